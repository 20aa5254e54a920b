//! Literal construction of blueprints.

/// Build a [`Blueprint`](crate::Blueprint) from `key => value` entries.
///
/// Values are anything convertible into an [`Attr`](crate::Attr): scalars,
/// [`Descriptor`](crate::Descriptor)s, [`NodeFn`](crate::NodeFn)s, and
/// nested `blueprint!` invocations.
///
/// ```
/// use ceibo::blueprint;
///
/// let bp = blueprint! {
///     "title" => "home",
///     "nested" => blueprint! {
///         "answer" => 42,
///     },
/// };
/// assert_eq!(bp.len(), 2);
/// ```
#[macro_export]
macro_rules! blueprint {
    () => {
        $crate::Blueprint::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut blueprint = $crate::Blueprint::new();
        $( blueprint.set($key, $value); )+
        blueprint
    }};
}
