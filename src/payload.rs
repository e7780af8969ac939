use std::collections::BTreeMap;

use crate::property::{Property, PropertyKey, PropertyValue};

/// The property-errors list attached to a payload line (used in `303`
/// replies): a non-empty list of numeric error codes for one property name.
pub type PropertyErrors = Vec<u16>;

/// A message's parameters payload (spec section 3).
///
/// `properties` and `property_errors` are mutually exclusive per name
/// (invariant I5); `get_parameter_list` is populated only for a
/// `GetParameter` request payload, where each line is a bare property name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload {
    pub properties: BTreeMap<PropertyKey, PropertyValue>,
    pub property_errors: BTreeMap<PropertyKey, PropertyErrors>,
    pub get_parameter_list: Vec<PropertyKey>,
}

impl Payload {
    pub fn new() -> Payload {
        Payload::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.property_errors.is_empty()
            && self.get_parameter_list.is_empty()
    }

    pub fn with_property(mut self, key: PropertyKey, value: Property) -> Self {
        self.properties.insert(key, PropertyValue::Value(value));
        self
    }

    pub fn with_none(mut self, key: PropertyKey) -> Self {
        self.properties.insert(key, PropertyValue::None);
        self
    }

    pub fn with_error(mut self, key: PropertyKey, codes: PropertyErrors) -> Self {
        self.property_errors.insert(key, codes);
        self
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::TriggerMethod;

    #[test]
    fn builder_roundtrips_through_get() {
        let payload = Payload::new().with_property(
            PropertyKey::TriggerMethod,
            Property::TriggerMethod(TriggerMethod::Play),
        );
        match payload.get(&PropertyKey::TriggerMethod) {
            Some(PropertyValue::Value(Property::TriggerMethod(TriggerMethod::Play))) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_payload_detected() {
        assert!(Payload::new().is_empty());
        let payload = Payload::new().with_none(PropertyKey::Route);
        assert!(!payload.is_empty());
    }
}
