use crate::spec::Field;

/// The kind of operation being executed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
}

/// A single operation from a resolved query document.
#[derive(Clone, Debug)]
pub struct Operation {
    kind: OperationKind,
    selection_set: Vec<Field>,
}

impl Operation {
    pub fn new(kind: OperationKind, selection_set: Vec<Field>) -> Self {
        Self {
            kind,
            selection_set,
        }
    }

    pub fn query(selection_set: Vec<Field>) -> Self {
        Self::new(OperationKind::Query, selection_set)
    }

    pub fn mutation(selection_set: Vec<Field>) -> Self {
        Self::new(OperationKind::Mutation, selection_set)
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn selection_set(&self) -> &[Field] {
        &self.selection_set
    }
}
