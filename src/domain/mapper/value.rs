//! Record-like values and their default string form.

use std::fmt;

/// A field value as seen by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
    Record(Record),
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Default string conversion. Works for every value; floats keep at least one
/// fractional digit (`6.0`), lists render as `[a, b]`, records as `Type(f=v)`.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

/// A named, ordered list of fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, keeping declaration order.
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToFieldValue) -> Self {
        self.push_field(name, value);
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl ToFieldValue) {
        self.fields.push((name.into(), value.to_field_value()));
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

/// A type that can list its own fields, in declaration order.
///
/// Usually implemented through [`crate::impl_to_record!`].
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

/// Conversion of a single field into a [`FieldValue`].
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl ToFieldValue for Record {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Record(self.clone())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

macro_rules! int_field_value {
    ($($t:ty),*) => {
        $(
            impl ToFieldValue for $t {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_field_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_int_field_value {
    ($($t:ty),*) => {
        $(
            impl ToFieldValue for $t {
                fn to_field_value(&self) -> FieldValue {
                    i64::try_from(*self)
                        .map(FieldValue::Int)
                        .unwrap_or_else(|_| FieldValue::Text(self.to_string()))
                }
            }
        )*
    };
}

wide_int_field_value!(u64, usize, isize);

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for char {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue> ToFieldValue for [T] {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldValue::Null, "null")]
    #[case(FieldValue::Bool(true), "true")]
    #[case(FieldValue::Int(20), "20")]
    #[case(FieldValue::Float(6.0), "6.0")]
    #[case(FieldValue::Float(42.5), "42.5")]
    #[case(FieldValue::Text("la la...".into()), "la la...")]
    #[case(FieldValue::List(vec![FieldValue::Int(1), FieldValue::Int(2)]), "[1, 2]")]
    fn test_default_string_conversion(#[case] value: FieldValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn test_record_display_lists_fields_in_order() {
        let record = Record::new("Componente")
            .with_field("nome", "Quizzes")
            .with_field("peso", 20);
        assert_eq!(record.to_string(), "Componente(nome=Quizzes, peso=20)");
    }

    #[test]
    fn test_option_none_is_null() {
        let missing: Option<String> = None;
        assert!(missing.to_field_value().is_null());
        assert_eq!(Some(3u8).to_field_value(), FieldValue::Int(3));
    }
}
