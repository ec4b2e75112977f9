/// The payload of a single attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Numbers(Vec<f64>),
}

/// A named piece of axis metadata, e.g. "standard_name" or "positive".
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

impl Attribute {
    pub fn text<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self {
            name: name.into(),
            value: AttrValue::Text(value.into()),
        }
    }

    pub fn number<S: Into<String>>(name: S, value: f64) -> Self {
        Self {
            name: name.into(),
            value: AttrValue::Number(value),
        }
    }

    pub fn numbers<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            value: AttrValue::Numbers(values),
        }
    }
}

/// An ordered name to attribute mapping.
///
/// Attributes iterate in insertion order. Pushing an attribute whose name is already present
/// replaces the existing entry in place, so each name appears at most once. Read-only once the
/// owning axis has been built.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeContainer {
    attrs: Vec<Attribute>,
}

impl AttributeContainer {
    pub fn new() -> Self {
        Self { attrs: vec![] }
    }

    pub fn push(&mut self, attr: Attribute) {
        match self.attrs.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => *existing = attr,
            None => self.attrs.push(attr),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeContainer {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for attr in iter {
            attrs.push(attr);
        }
        attrs
    }
}
