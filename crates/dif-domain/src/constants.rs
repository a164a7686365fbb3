//! Domain layer constants

/// Conventional method name used by the mediator
pub const HANDLE_CONVENTION: &str = "handle";

/// Conventional method name used by the mapper
pub const MAP_CONVENTION: &str = "map";

/// Conventional method name used by the validator
pub const VALIDATE_CONVENTION: &str = "validate";

/// Name given to descriptors built without an explicit name
pub const ANONYMOUS_METHOD: &str = "<anonymous>";

/// Largest parameter count supported by `Callable` adapters (receiver included)
pub const MAX_CALLABLE_ARITY: usize = 8;
