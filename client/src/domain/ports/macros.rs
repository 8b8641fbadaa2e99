//! Helper macro for generating port error enums.

/// Generate a thiserror enum whose variants each carry one `message` field,
/// plus a snake-case constructor per variant accepting any displayable value.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Description of the failure.
                    message: String,
                },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    #[doc = concat!(
                        "Build [`", stringify!($name), "::", stringify!($variant),
                        "`] from any displayable cause."
                    )]
                    pub fn [<$variant:snake>](message: impl ::std::fmt::Display) -> Self {
                        Self::$variant { message: message.to_string() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
