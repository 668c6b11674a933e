/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` defines a configuration struct with embedded defaults in
/// a single declaration: field name, type, and default value in one place.
/// It generates the struct with public fields, the `Default` implementation,
/// and serde support with `#[serde(default)]` so missing file entries fall
/// back to defaults instead of failing the parse.
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct SearchConfig {
///         default_page_size: usize = 25,
///         max_page_size: usize = 200,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
