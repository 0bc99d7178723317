//! Helper macro generating port error enums with snake_case constructors.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StorePortError {
//!         Closed => "store is closed",
//!         Rejected {
//!             /// Why the write was refused.
//!             reason: String,
//!         } => "store rejected write: {reason}",
//!     }
//! }
//!
//! let err = StorePortError::rejected("full");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum SamplePortError {
            Closed => "closed",
            Rejected { reason: String } => "rejected: {reason}",
            Limited { reason: String, limit: u32 } => "limited: {reason} ({limit})",
        }
    }

    #[test]
    fn unit_constructor_builds_variant() {
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("full");
        assert_eq!(err.to_string(), "rejected: full");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::limited("busy", 3_u32);
        assert_eq!(err.to_string(), "limited: busy (3)");
    }
}
