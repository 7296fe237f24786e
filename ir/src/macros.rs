// State lookups yield `Option` so transition closures can use `?`.

#[macro_export]
macro_rules! bv_var {
    ($state:expr, $name:expr) => {
        $state.get($name).and_then(|node| node.as_bv())
    };
}

#[macro_export]
macro_rules! int_var {
    ($state:expr, $name:expr) => {
        $state.get($name).and_then(|node| node.as_int())
    };
}

#[macro_export]
macro_rules! to_dyn {
    ($node:expr) => {
        z3::ast::Dynamic::from_ast(&$node)
    };
}

/// Bit-vector literal of the given width.
#[macro_export]
macro_rules! bv_val {
    ($ctx:expr, $value:expr, $width:expr) => {
        z3::ast::BV::from_u64($ctx, $value as u64, $width)
    };
}
