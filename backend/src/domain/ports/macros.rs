//! Helper macro for declaring port error enums.

/// Declare a port error enum with thiserror messages and snake_case
/// constructors that accept `impl Into<FieldType>` for every field.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    /// Build this variant, converting each field.
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error used only by this test.
        pub enum ExamplePortError {
            /// String-field variant.
            Broken { message: String } => "broken: {message}",
            /// Mixed-field variant.
            OutOfRange { field: String, limit: i64 } => "{field} exceeds {limit}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::broken("oops");
        assert_eq!(err.to_string(), "broken: oops");
    }

    #[test]
    fn constructors_support_mixed_field_types() {
        let err = ExamplePortError::out_of_range("size", 10_i64);
        assert_eq!(err.to_string(), "size exceeds 10");
    }
}
