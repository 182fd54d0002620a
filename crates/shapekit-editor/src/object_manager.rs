//! Ownership of editor objects.

use shapekit_core::ObjectId;

use crate::shape::ShapeObject;

/// Owns every shape in the level, in creation order, plus the selection.
#[derive(Debug, Default)]
pub struct ObjectManager {
    objects: Vec<ShapeObject>,
    selection: Vec<ObjectId>,
    removed: Vec<ObjectId>,
}

impl ObjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: ShapeObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Inserts at a position in creation order, clamped to the end.
    pub fn insert_at(&mut self, index: usize, object: ShapeObject) -> ObjectId {
        let id = object.id();
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        id
    }

    /// Takes an object out, returning its position so it can be put back.
    pub fn remove(&mut self, id: ObjectId) -> Option<(usize, ShapeObject)> {
        let index = self.index_of(id)?;
        let mut object = self.objects.remove(index);
        if object.is_selected() {
            object.set_selected(false);
        }
        self.selection.retain(|s| *s != id);
        self.removed.push(id);
        Some((index, object))
    }

    /// Ids removed since the last call, oldest first.
    pub fn drain_removed(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.removed)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn find(&self, id: ObjectId) -> Option<&ShapeObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut ShapeObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ShapeObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    /// Two distinct objects borrowed mutably at once.
    pub fn find_pair_mut(
        &mut self,
        a: ObjectId,
        b: ObjectId,
    ) -> Option<(&mut ShapeObject, &mut ShapeObject)> {
        if a == b {
            return None;
        }
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia < ib {
            let (left, right) = self.objects.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.objects.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// `prefix` followed by one more than the highest number already used
    /// with that prefix.
    pub fn unique_name(&self, prefix: &str) -> String {
        let highest = self
            .objects
            .iter()
            .filter_map(|o| o.name().strip_prefix(prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{}", prefix, highest + 1)
    }

    pub fn select(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.find_mut(id) else {
            return false;
        };
        object.set_selected(true);
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        true
    }

    pub fn deselect(&mut self, id: ObjectId) {
        if let Some(object) = self.find_mut(id) {
            object.set_selected(false);
        }
        self.selection.retain(|s| *s != id);
    }

    pub fn clear_selection(&mut self) {
        for id in std::mem::take(&mut self.selection) {
            if let Some(object) = self.find_mut(id) {
                object.set_selected(false);
            }
        }
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.selection
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }
}
