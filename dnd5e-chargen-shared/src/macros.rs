/// Lets a `FromStr` type be deserialized with `#[serde(try_from = "smartstring::alias::String")]`.
#[macro_export]
macro_rules! try_from_str {
    ($t:ident) => {
        impl ::std::convert::TryFrom<::smartstring::alias::String> for $t {
            type Error = <$t as ::std::str::FromStr>::Err;

            #[inline]
            fn try_from(s: ::smartstring::alias::String) -> ::std::result::Result<Self, Self::Error> {
                <$t as ::std::str::FromStr>::from_str(s.as_str())
            }
        }
    };
}

/// Serializes a type through its `Display` implementation.
#[macro_export]
macro_rules! serialize_display {
    ($t:ident) => {
        impl ::serde::ser::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::ser::Serializer,
            {
                let s = format!("{}", self);
                serializer.serialize_str(s.as_str())
            }
        }
    };
}
