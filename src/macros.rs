/// Implements [`ToRecord`](crate::domain::ToRecord) and
/// [`ToFieldValue`](crate::domain::ToFieldValue) for a struct by listing its
/// fields in declaration order.
///
/// The element name defaults to the struct name; `as "name"` overrides it.
///
/// ```
/// use xmlmodel::domain::{ElementTree, Mapper};
///
/// struct Componente {
///     nome: String,
///     peso: u32,
/// }
/// xmlmodel::impl_to_record!(Componente { nome, peso });
///
/// let mut tree = ElementTree::new();
/// let id = Mapper::default()
///     .map(&mut tree, &Componente { nome: "Quizzes".into(), peso: 20 })
///     .unwrap();
/// assert_eq!(tree.get(id).unwrap().name(), "Componente");
/// assert_eq!(tree.get(id).unwrap().attribute("peso"), Some("20"));
/// ```
#[macro_export]
macro_rules! impl_to_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::impl_to_record!(@impl $ty, stringify!($ty), [$($field),*]);
    };
    ($ty:ident as $name:literal { $($field:ident),* $(,)? }) => {
        $crate::impl_to_record!(@impl $ty, $name, [$($field),*]);
    };
    (@impl $ty:ident, $name:expr, [$($field:ident),*]) => {
        impl $crate::domain::ToRecord for $ty {
            fn to_record(&self) -> $crate::domain::Record {
                #[allow(unused_mut)]
                let mut record = $crate::domain::Record::new($name);
                $(
                    record.push_field(stringify!($field), &self.$field);
                )*
                record
            }
        }

        impl $crate::domain::ToFieldValue for $ty {
            fn to_field_value(&self) -> $crate::domain::FieldValue {
                $crate::domain::FieldValue::Record($crate::domain::ToRecord::to_record(self))
            }
        }
    };
}
