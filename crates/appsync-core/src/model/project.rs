use serde::{Deserialize, Serialize};

use crate::entity::{BaseModel, Entity, Index, index_of};

/// A project groups applications, envs and targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for Project {
    const TABLE: &'static str = "project";

    fn primary_key(&self) -> String {
        self.name.clone()
    }

    fn index(&self) -> Index {
        index_of(&[("name", &self.name), ("owner", &self.owner)])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}
