//! Key enums naming the editable fields of each model section

/// Defines a field-key enum for one model section and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, Hash)
/// - `ALL` in declaration order and `SECTION` (the section name used in errors)
/// - `key()` returning the camelCase field name used in snapshots and overrides
/// - `FromStr` (unknown names fail with `ForecastError::UnknownKey`) and `Display`
///
/// Usage:
///   define_key_enum!(CogsLine, "cogs", { HostingAi => "hostingAI", ... });
macro_rules! define_key_enum {
    ($name:ident, $section:literal, { $($variant:ident => $key:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const SECTION: &'static str = $section;

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ForecastError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err($crate::error::ForecastError::UnknownKey {
                        section: $section,
                        key: other.to_string(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

pub(crate) use define_key_enum;
