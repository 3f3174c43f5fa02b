//! # Edit Reducer
//!
//! `EditorState` owns the document, the selection and the history log. All
//! changes go through [`EditorState::dispatch`]; an action that cannot apply
//! (stale id, bad target) leaves the state exactly as it was.
//!
//! ```rust,ignore
//! let mut state = EditorState::new();
//! let heading = state.create_node(NodeKind::Heading).into_vec();
//! state.dispatch(EditorAction::add(heading, ROOT_ID, 0));
//! state.dispatch(EditorAction::Undo);
//! ```

use crate::actions::EditorAction;
use crate::document::{PageDocument, PageStyles};
use crate::errors::EditError;
use crate::history::History;
use crate::id_generator::IdGenerator;
use crate::kind::NodeKind;
use crate::locator;
use crate::node::{AttributeName, ColumnsPayload, Content, ContentNode, Layout, NodeId};
use crate::style::{Breakpoint, InteractionState, StyleProps};
use crate::template::{self, Created};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct EditorState {
    document: PageDocument,
    selected: Option<NodeId>,
    history: History,
    ids: IdGenerator,

    /// Increments on every change to content or page styles
    version: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `action` to `state` and return the result
pub fn reduce(mut state: EditorState, action: EditorAction) -> EditorState {
    state.dispatch(action);
    state
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_history_limit(0)
    }

    /// Keep at most `max_levels` snapshots (0 = unlimited)
    pub fn with_history_limit(max_levels: usize) -> Self {
        Self {
            document: PageDocument::default(),
            selected: None,
            history: History::with_max_levels(max_levels),
            ids: IdGenerator::new(),
            version: 0,
        }
    }

    /// Draw new ids from `ids` instead of a random session seed
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Apply an action. Actions that cannot apply are logged and ignored.
    pub fn dispatch(&mut self, action: EditorAction) {
        let name = action.name();
        if let Err(e) = self.try_dispatch(action) {
            tracing::debug!(action = name, error = %e, "edit applied as no-op");
        }
    }

    /// Apply an action, reporting why it could not apply
    pub fn try_dispatch(&mut self, action: EditorAction) -> Result<(), EditError> {
        match action {
            EditorAction::SetInitialState {
                content,
                page_styles,
            } => {
                self.replace_document(content, page_styles);
                Ok(())
            }

            EditorAction::AddElement {
                elements,
                parent_id,
                index,
            } => self.add_elements(elements, &parent_id, index),

            EditorAction::MoveElement {
                dragged_id,
                target_parent_id,
                target_index,
            } => self.move_element(&dragged_id, &target_parent_id, target_index),

            EditorAction::UpdateStyles {
                element_id,
                styles,
                breakpoint,
                state,
            } => self.update_styles(&element_id, styles, breakpoint, state),

            EditorAction::UpdateContent {
                element_id,
                content,
            } => self.update_content(&element_id, &content),

            EditorAction::UpdateAttribute {
                element_id,
                attribute,
                value,
            } => self.update_attribute(&element_id, attribute, &value),

            EditorAction::DeleteElement { element_id } => self.delete_element(&element_id),

            EditorAction::DuplicateElement { element_id } => self.duplicate_element(&element_id),

            EditorAction::SetSelection { element_id } => {
                self.selected = element_id;
                Ok(())
            }

            EditorAction::SetPageStyles { styles } => {
                self.set_page_styles(styles);
                Ok(())
            }

            EditorAction::PushHistory => {
                self.push_history();
                Ok(())
            }

            EditorAction::Undo => {
                if let Some(snapshot) = self.history.undo() {
                    self.document.content = snapshot.to_vec();
                    self.selected = None;
                    self.version += 1;
                }
                Ok(())
            }

            EditorAction::Redo => {
                if let Some(snapshot) = self.history.redo() {
                    self.document.content = snapshot.to_vec();
                    self.selected = None;
                    self.version += 1;
                }
                Ok(())
            }

            EditorAction::RevertToVersion {
                content,
                page_styles,
            } => {
                self.replace_document(content, page_styles);
                self.push_history();
                Ok(())
            }
        }
    }

    fn replace_document(&mut self, mut content: Vec<ContentNode>, page_styles: PageStyles) {
        let repaired = locator::repair_duplicate_ids(&mut content, &mut self.ids);
        if repaired > 0 {
            tracing::warn!(repaired, "re-keyed duplicate ids in loaded content");
        }

        self.document = PageDocument::new(content, page_styles);
        self.selected = None;
        self.version += 1;
    }

    fn add_elements(&mut self, elements: Vec<ContentNode>, parent_id: &str, index: usize) -> Result<(), EditError> {
        let Some(last_id) = elements.last().map(|node| node.id.clone()) else {
            return Ok(());
        };

        if let Some(id) = locator::duplicate_ids(&elements).into_iter().next() {
            return Err(EditError::DuplicateId(id));
        }
        if let Some(id) = locator::collect_ids(&elements)
            .into_iter()
            .find(|id| locator::contains(&self.document.content, id))
        {
            return Err(EditError::DuplicateId(id.to_string()));
        }

        check_container(&self.document.content, parent_id)?;
        let siblings = locator::container_mut(&mut self.document.content, parent_id)
            .ok_or_else(|| EditError::ParentNotFound(parent_id.to_string()))?;

        let at = index.min(siblings.len());
        siblings.splice(at..at, elements);

        self.selected = Some(last_id);
        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn move_element(&mut self, dragged_id: &str, target_parent_id: &str, target_index: usize) -> Result<(), EditError> {
        let dragged = locator::find(&self.document.content, dragged_id)
            .ok_or_else(|| EditError::NodeNotFound(dragged_id.to_string()))?;

        if !locator::is_root(target_parent_id) && locator::subtree_contains(dragged, target_parent_id) {
            return Err(EditError::CycleDetected(target_parent_id.to_string()));
        }
        check_container(&self.document.content, target_parent_id)?;

        let origin = locator::locate(&self.document.content, dragged_id)
            .map(|location| (location.parent.container_id().to_string(), location.index))
            .ok_or_else(|| EditError::NodeNotFound(dragged_id.to_string()))?;

        let node = locator::take(&mut self.document.content, dragged_id)
            .ok_or_else(|| EditError::NodeNotFound(dragged_id.to_string()))?;

        match locator::container_mut(&mut self.document.content, target_parent_id) {
            Some(siblings) => {
                let at = target_index.min(siblings.len());
                siblings.insert(at, node);
            }
            None => {
                // Put it back where it was
                if let Some(siblings) = locator::container_mut(&mut self.document.content, &origin.0) {
                    let at = origin.1.min(siblings.len());
                    siblings.insert(at, node);
                }
                return Err(EditError::ParentNotFound(target_parent_id.to_string()));
            }
        }

        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn update_styles(
        &mut self,
        element_id: &str,
        styles: StyleProps,
        breakpoint: Breakpoint,
        state: InteractionState,
    ) -> Result<(), EditError> {
        let node = self.node_mut(element_id)?;
        if !node.styles.merge(breakpoint, state, styles) {
            return Ok(());
        }

        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn update_content(&mut self, element_id: &str, raw: &str) -> Result<(), EditError> {
        let kind = self.node(element_id)?.kind;

        if kind == NodeKind::Columns {
            let payload = ColumnsPayload::parse(raw).map_err(|e| EditError::InvalidContent {
                node_id: element_id.to_string(),
                reason: e.to_string(),
            })?;
            self.check_slot_ids(element_id, &payload)?;

            let node = self.node_mut(element_id)?;
            node.layout = Layout::Slots(payload.columns);
            node.content = Content::Empty;
        } else {
            let node = self.node_mut(element_id)?;
            node.content = Content::decode(kind, raw);
        }

        self.version += 1;
        self.push_history();
        Ok(())
    }

    /// New slot contents may not reuse ids from anywhere else in the document
    fn check_slot_ids(&self, element_id: &str, payload: &ColumnsPayload) -> Result<(), EditError> {
        let rest = locator::remove(&self.document.content, element_id);
        let mut seen: HashSet<&str> = locator::collect_ids(&rest).into_iter().collect();
        seen.insert(element_id);

        for slot in &payload.columns {
            let incoming = std::iter::once(slot.id.as_str()).chain(locator::collect_ids(&slot.children));
            for id in incoming {
                if !seen.insert(id) {
                    return Err(EditError::DuplicateId(id.to_string()));
                }
            }
        }
        Ok(())
    }

    fn update_attribute(&mut self, element_id: &str, attribute: AttributeName, value: &str) -> Result<(), EditError> {
        let node = self.node_mut(element_id)?;
        if !node.attributes.set(attribute, value) {
            return Ok(());
        }

        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn delete_element(&mut self, element_id: &str) -> Result<(), EditError> {
        self.node(element_id)?;
        self.document.content = locator::remove(&self.document.content, element_id);

        if let Some(selected) = &self.selected {
            if locator::find(&self.document.content, selected).is_none() {
                self.selected = None;
            }
        }

        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn duplicate_element(&mut self, element_id: &str) -> Result<(), EditError> {
        let location = locator::locate(&self.document.content, element_id)
            .ok_or_else(|| EditError::NodeNotFound(element_id.to_string()))?;
        let container_id = location.parent.container_id().to_string();
        let index = location.index;

        let original = locator::find(&self.document.content, element_id)
            .ok_or_else(|| EditError::NodeNotFound(element_id.to_string()))?;
        let clone = locator::deep_clone(original, &mut self.ids);
        let clone_id = clone.id.clone();

        let siblings = locator::container_mut(&mut self.document.content, &container_id)
            .ok_or_else(|| EditError::ParentNotFound(container_id.clone()))?;
        siblings.insert(index + 1, clone);

        self.selected = Some(clone_id);
        self.version += 1;
        self.push_history();
        Ok(())
    }

    fn set_page_styles(&mut self, partial: Map<String, Value>) {
        self.document.page_styles.merge(partial);
        self.version += 1;
    }

    fn push_history(&mut self) {
        if !self.history.push(&self.document.content) {
            tracing::trace!("content unchanged; history not pushed");
        }
    }

    fn node(&self, id: &str) -> Result<&ContentNode, EditError> {
        locator::find(&self.document.content, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut ContentNode, EditError> {
        locator::find_mut(&mut self.document.content, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))
    }

    /// Instantiate a template using this session's id generator
    pub fn create_node(&mut self, kind: NodeKind) -> Created {
        template::create_node(kind, &mut self.ids)
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn content(&self) -> &[ContentNode] {
        &self.document.content
    }

    pub fn page_styles(&self) -> &PageStyles {
        &self.document.page_styles
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&ContentNode> {
        self.selected
            .as_deref()
            .and_then(|id| locator::find(&self.document.content, id))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// `parent_id` must be the root, a stack node, or a slot
fn check_container(content: &[ContentNode], parent_id: &str) -> Result<(), EditError> {
    if locator::is_root(parent_id) {
        return Ok(());
    }
    match locator::find(content, parent_id) {
        Some(node) => match node.layout {
            Layout::Stack(_) => Ok(()),
            _ => Err(EditError::NotAContainer(parent_id.to_string())),
        },
        None if locator::contains(content, parent_id) => Ok(()),
        None => Err(EditError::ParentNotFound(parent_id.to_string())),
    }
}
