//! Accessor and literal macros
//!
//! `impl_enum_accessors!` removes repetitive match code on `VNode`;
//! `props!` builds a `Props` literal.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// Boxed payloads are unboxed through `Borrow`.
///
/// # Example
/// ```ignore
/// impl VNode {
///     // element -> Element, text -> Text
///     impl_enum_accessors!(element, text);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self {
                        Self::[<$variant:camel>](v) => Some(::core::borrow::Borrow::borrow(v)),
                        _ => None,
                    }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self {
                        Self::[<$variant:camel>](v) => Some(::core::borrow::BorrowMut::borrow_mut(v)),
                        _ => None,
                    }
                }
            )*
        }
    };
}

/// Build a [`Props`](crate::Props) literal
///
/// ```
/// use tola_portal::props;
///
/// let p = props! { "label" => "x", "count" => 3 };
/// assert_eq!(p.get_str("label"), Some("x"));
/// assert!(props!().is_empty());
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(props.set($key, $value);)+
        props
    }};
}
