use {
    crate::{wire, Scope, StackPolicyDocument, StackPolicyError},
    log::debug,
    serde_json::Value,
    std::sync::Arc,
};

/// A stack policy attached to a scope.
///
/// The node owns its document and never changes it. The scope supplies identity and resolves any tokens the
/// document references when it is converted to the wire format.
#[derive(Clone, Debug, PartialEq)]
pub struct StackPolicy {
    node: Arc<Scope>,
    document: StackPolicyDocument,
}

impl StackPolicy {
    /// Creates a stack policy named `id` beneath `parent`.
    pub fn new<S: Into<String>>(
        parent: &Arc<Scope>,
        id: S,
        document: StackPolicyDocument,
    ) -> Result<Self, StackPolicyError> {
        let node = Arc::new(Scope::child(parent, id)?);
        debug!("Created stack policy {} with {} statement(s)", node.path(), document.len());
        Ok(Self {
            node,
            document,
        })
    }

    #[inline]
    pub fn document(&self) -> &StackPolicyDocument {
        &self.document
    }

    #[inline]
    pub fn node(&self) -> &Arc<Scope> {
        &self.node
    }

    #[inline]
    pub fn path(&self) -> String {
        self.node.path()
    }

    /// The document in the PascalCase form the service expects, with tokens resolved against this node's scope.
    pub fn to_wire(&self) -> Result<Value, StackPolicyError> {
        wire::to_wire(&self.document, self.node.as_ref())
    }

    /// The wire form as pretty-printed JSON, suitable for use as a stack policy body.
    pub fn to_wire_json(&self) -> Result<String, StackPolicyError> {
        let value = self.to_wire()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
