//! Declarative form schemas and the pure validator

mod field;
mod validate;

pub use field::*;
pub use validate::*;

/// How a form's payload is encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// An ordered set of field specifications bound to an endpoint.
///
/// Immutable once constructed; one definition exists per screen.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    name: &'static str,
    endpoint: &'static str,
    encoding: Encoding,
    requires_auth: bool,
    fields: Vec<FieldSpec>,
}

impl FormDefinition {
    pub fn new(
        name: &'static str,
        endpoint: &'static str,
        encoding: Encoding,
        requires_auth: bool,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name,
            endpoint,
            encoding,
            requires_auth,
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_by_name() {
        let def = FormDefinition::new(
            "demo",
            "/v1/demo",
            Encoding::Json,
            false,
            vec![FieldSpec::text("email", "Email", vec![])],
        );
        assert!(def.field("email").is_some());
        assert!(def.field("missing").is_none());
    }

    #[test]
    fn test_fields_preserve_declaration_order() {
        let def = FormDefinition::new(
            "demo",
            "/v1/demo",
            Encoding::Json,
            false,
            vec![
                FieldSpec::text("b", "B", vec![]),
                FieldSpec::text("a", "A", vec![]),
            ],
        );
        let names: Vec<_> = def.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
