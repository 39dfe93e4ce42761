use crate::areas::model::RepositoryModel;
use std::cell::{RefCell, RefMut};

/// What the command layer runs against: the repository model and where output goes
pub struct Session {
    model: RepositoryModel,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Session {
    pub fn new(writer: Box<dyn std::io::Write>) -> Self {
        Session {
            model: RepositoryModel::new(),
            writer: RefCell::new(writer),
        }
    }

    pub fn model(&self) -> &RepositoryModel {
        &self.model
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }
}
