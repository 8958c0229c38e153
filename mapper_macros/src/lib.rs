//! Procedural macros for `json_mapper`

mod raw_backed;

use proc_macro::TokenStream;

/// Derives `json_mapper::RawBacked` for a fieldless enum.
///
/// String-backed enums (the default) use each variant name, converted by the
/// container's `rename_all` rule, as the raw value. A variant can override it
/// with `#[raw(value = "...")]`.
///
/// ```ignore
/// #[derive(RawBacked)]
/// #[raw_backed(rename_all = "camelCase")]
/// pub enum Suit {
///     Spades,
///     #[raw(value = "HEARTS")]
///     Hearts,
///     ClubsOfDoom,
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl ::json_mapper::RawBacked for Suit {
///     type Raw = ::std::string::String;
///
///     fn from_raw_value(raw: &Self::Raw) -> Option<Self> {
///         match raw.as_str() {
///             "spades" => Some(Self::Spades),
///             "HEARTS" => Some(Self::Hearts),
///             "clubsOfDoom" => Some(Self::ClubsOfDoom),
///             _ => None,
///         }
///     }
///
///     fn raw_value(&self) -> Self::Raw { /* ... */ }
/// }
/// ```
///
/// Integer-backed enums name their backing type with `repr` and give every
/// variant an explicit discriminant, which becomes its raw value:
///
/// ```ignore
/// #[derive(RawBacked)]
/// #[raw_backed(repr = "u8")]
/// pub enum Priority {
///     Low = 1,
///     High = 5,
/// }
/// ```
#[proc_macro_derive(RawBacked, attributes(raw_backed, raw))]
pub fn derive_raw_backed(input: TokenStream) -> TokenStream {
    raw_backed::derive_raw_backed_impl(input)
}
