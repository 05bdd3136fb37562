use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::EditorError;
use crate::elements::{
    ElementFlags, ElementId, ElementProps, ELEMENT_DATA, EL_NONE, FLAG_CONDUCTIVE, FLAG_ENERGY,
    FLAG_NONE,
};

/// Element classification table consulted by the tools.
///
/// `from_generated()` is the built-in table; a JSON bundle can replace it when the
/// host ships a different element set.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    elements: Vec<ContentElement>,
    element_key_to_id: HashMap<String, ElementId>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentElement {
    pub id: ElementId,
    pub key: String,
    pub name: String,
    pub color: u32,
    #[serde(skip)]
    pub flags: ElementFlags,
}

impl ContentRegistry {
    pub fn from_generated() -> Self {
        let elements: Vec<ContentElement> = ELEMENT_DATA
            .iter()
            .enumerate()
            .map(|(idx, props)| ContentElement::from_props(idx as ElementId, props))
            .collect();

        let element_key_to_id = elements
            .iter()
            .map(|el| (el.key.clone(), el.id))
            .collect();

        Self {
            elements,
            element_key_to_id,
        }
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, EditorError> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_valid_element_id(&self, id: ElementId) -> bool {
        (id as usize) < self.elements.len()
    }

    pub fn element(&self, id: ElementId) -> Option<&ContentElement> {
        self.elements.get(id as usize)
    }

    /// Energy-class elements live in the energy occupancy layer
    pub fn is_energy(&self, id: ElementId) -> bool {
        self.element(id).map_or(false, |el| el.flags & FLAG_ENERGY != 0)
    }

    pub fn is_conductive(&self, id: ElementId) -> bool {
        self.element(id).map_or(false, |el| el.flags & FLAG_CONDUCTIVE != 0)
    }

    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    pub fn id_by_key(&self, key: &str) -> Option<ElementId> {
        self.element_key_to_id.get(key).copied()
    }

    pub fn manifest_json(&self) -> String {
        serde_json::to_string(&self.elements).unwrap_or_else(|_| "[]".to_string())
    }

    fn from_bundle(bundle: BundleRoot) -> Result<Self, EditorError> {
        let mut max_id: u16 = 0;
        for el in bundle.elements.iter() {
            max_id = max_id.max(el.id);
        }
        if max_id > (u8::MAX as u16) {
            return Err(EditorError::ElementIdOutOfRange(max_id));
        }

        let mut by_id: Vec<Option<ContentElement>> = vec![None; (max_id as usize) + 1];
        for el in bundle.elements.into_iter() {
            let id = el.id as ElementId;
            let slot = &mut by_id[id as usize];
            if slot.is_some() {
                return Err(EditorError::DuplicateElement(id));
            }

            let mut flags = FLAG_NONE;
            if el.energy {
                flags |= FLAG_ENERGY;
            }
            if el.conductive {
                flags |= FLAG_CONDUCTIVE;
            }

            let name = el.name.unwrap_or_else(|| short_name(&el.key));
            *slot = Some(ContentElement {
                id,
                key: el.key,
                name,
                color: el.color,
                flags,
            });
        }

        if !matches!(by_id.get(EL_NONE as usize), Some(Some(_))) {
            return Err(EditorError::MissingElement(EL_NONE as usize));
        }

        let mut elements = Vec::with_capacity(by_id.len());
        for (idx, slot) in by_id.into_iter().enumerate() {
            elements.push(slot.ok_or(EditorError::MissingElement(idx))?);
        }

        let element_key_to_id = elements
            .iter()
            .map(|el| (el.key.clone(), el.id))
            .collect();

        Ok(Self {
            elements,
            element_key_to_id,
        })
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::from_generated()
    }
}

impl ContentElement {
    fn from_props(id: ElementId, props: &ElementProps) -> Self {
        Self {
            id,
            key: format!("base:{}", props.name.to_ascii_lowercase()),
            name: props.name.to_string(),
            color: props.color,
            flags: props.flags,
        }
    }
}

fn short_name(key: &str) -> String {
    key.rsplit(':').next().unwrap_or(key).to_ascii_uppercase()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    elements: Vec<BundleElement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleElement {
    id: u16,
    key: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color: u32,
    #[serde(default)]
    energy: bool,
    #[serde(default)]
    conductive: bool,
}
