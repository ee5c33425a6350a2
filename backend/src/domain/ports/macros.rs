//! Declarative helper for driven-port error enums.
//!
//! Every port error variant carries one text field describing the cause.
//! The macro derives `thiserror::Error`, a snake-case constructor per
//! variant taking `impl Into<String>`, and a `detail()` accessor returning
//! the carried text.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : String } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                }
            )+

            /// Text carried by the variant, without the display prefix.
            #[must_use]
            pub fn detail(&self) -> &str {
                match self {
                    $( Self::$variant { $field } => $field.as_str(), )+
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerPortError {
            Unreachable { message: String } => "ledger unreachable: {message}",
            Duplicate { field: String } => "ledger already holds {field}",
        }
    }

    #[test]
    fn constructors_accept_str_and_string() {
        assert_eq!(
            LedgerPortError::unreachable("timeout"),
            LedgerPortError::unreachable(String::from("timeout"))
        );
    }

    #[test]
    fn display_uses_variant_message() {
        let err = LedgerPortError::duplicate("email");
        assert_eq!(err.to_string(), "ledger already holds email");
    }

    #[test]
    fn detail_returns_carried_text() {
        assert_eq!(LedgerPortError::unreachable("timeout").detail(), "timeout");
        assert_eq!(LedgerPortError::duplicate("email").detail(), "email");
    }
}
