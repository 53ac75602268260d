//! Well-known names of the descriptor annotation convention.

/// Binary name of the `@Desc` marker annotation.
pub const DESC_CLASS: &str = "org.spongepowered.asm.mixin.injection.Desc";

/// Element holding the owning type, `Class<?>`.
pub const OWNER_ELEMENT: &str = "owner";

/// Element holding the member name, `String`. Also the implicit element of a
/// single unnamed annotation argument.
pub const VALUE_ELEMENT: &str = "value";

/// Element holding the return type, `Class<?>`.
pub const RET_ELEMENT: &str = "ret";

/// Element holding the argument types, `Class<?>[]`.
pub const ARGS_ELEMENT: &str = "args";
