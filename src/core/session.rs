use crate::core::collection::ParcelCollection;
use crate::core::{Confirm, IdGenerator, KeyValueStore, Parcel, ParcelInput};
use crate::utils::error::{ParcelError, Result};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this parcel?";

/// Which screen the user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Listing,
    Adding,
    Editing(Parcel),
}

/// The list-view / form-view state machine driving a [`ParcelCollection`].
pub struct Session<S: KeyValueStore, G: IdGenerator> {
    collection: ParcelCollection<S, G>,
    view: View,
}

impl<S: KeyValueStore, G: IdGenerator> Session<S, G> {
    pub fn new(collection: ParcelCollection<S, G>) -> Self {
        Self {
            collection,
            view: View::Listing,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn parcels(&self) -> &[Parcel] {
        self.collection.list()
    }

    pub fn collection(&self) -> &ParcelCollection<S, G> {
        &self.collection
    }

    pub fn into_collection(self) -> ParcelCollection<S, G> {
        self.collection
    }

    /// The values the form shows: blank defaults when adding, the parcel's
    /// current fields when editing, nothing while listing.
    pub fn form(&self) -> Option<ParcelInput> {
        match &self.view {
            View::Listing => None,
            View::Adding => Some(ParcelInput::default()),
            View::Editing(parcel) => Some(parcel.to_input()),
        }
    }

    pub fn begin_add(&mut self) {
        self.view = View::Adding;
    }

    /// Opens the form on an existing parcel. Returns `false` and stays put
    /// when the id is unknown.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.collection.get(id) {
            Some(parcel) => {
                self.view = View::Editing(parcel.clone());
                true
            }
            None => {
                tracing::debug!("Edit requested for unknown parcel {}", id);
                false
            }
        }
    }

    /// Creates or updates depending on the open form, then returns to the
    /// list. On error the form stays open.
    pub fn submit(&mut self, data: ParcelInput) -> Result<Parcel> {
        let saved = match &self.view {
            View::Listing => {
                return Err(ParcelError::InvalidStateError {
                    message: "no form is open to submit".to_string(),
                })
            }
            View::Adding => self.collection.create(data)?,
            View::Editing(parcel) => {
                let id = parcel.id.clone();
                self.collection.update(&id, data)?
            }
        };
        self.view = View::Listing;
        Ok(saved)
    }

    pub fn cancel(&mut self) {
        self.view = View::Listing;
    }

    /// Deletes only after `confirmer` approves. Returns whether the delete
    /// ran.
    pub fn request_delete(&mut self, id: &str, confirmer: &mut impl Confirm) -> Result<bool> {
        if !confirmer.confirm(DELETE_PROMPT) {
            tracing::debug!("Delete of parcel {} was not confirmed", id);
            return Ok(false);
        }
        self.collection.delete(id)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryKeyValueStore, SequentialIdGenerator};
    use crate::core::persistence::ParcelRepository;

    fn session() -> Session<MemoryKeyValueStore, SequentialIdGenerator> {
        Session::new(ParcelCollection::open_with_ids(
            ParcelRepository::new(MemoryKeyValueStore::new()),
            SequentialIdGenerator::new("p"),
        ))
    }

    #[test]
    fn test_add_flow() {
        let mut session = session();
        assert_eq!(session.view(), &View::Listing);
        assert_eq!(session.form(), None);

        session.begin_add();
        assert_eq!(session.form(), Some(ParcelInput::default()));

        let created = session.submit(ParcelInput::new("Box A", 2, 1.5)).unwrap();
        assert_eq!(session.view(), &View::Listing);
        assert_eq!(session.parcels(), &[created]);
    }

    #[test]
    fn test_edit_flow_prefills_form() {
        let mut session = session();
        session.begin_add();
        let created = session.submit(ParcelInput::new("Box A", 2, 1.5)).unwrap();

        assert!(session.begin_edit(&created.id));
        assert_eq!(session.form(), Some(created.to_input()));

        let updated = session.submit(ParcelInput::new("Box A+", 3, 1.5)).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(session.parcels()[0].name, "Box A+");
        assert_eq!(session.view(), &View::Listing);
    }

    #[test]
    fn test_edit_unknown_id_is_ignored() {
        let mut session = session();
        assert!(!session.begin_edit("ghost"));
        assert_eq!(session.view(), &View::Listing);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut session = session();
        session.begin_add();
        assert!(session.submit(ParcelInput::new("Box", 0, 1.0)).is_err());
        assert_eq!(session.view(), &View::Adding);
        assert!(session.parcels().is_empty());
    }

    #[test]
    fn test_submit_without_form_fails() {
        let mut session = session();
        let err = session.submit(ParcelInput::new("Box", 1, 1.0)).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidStateError { .. }));
    }

    #[test]
    fn test_cancel_discards_form() {
        let mut session = session();
        session.begin_add();
        session.cancel();
        assert_eq!(session.view(), &View::Listing);
        assert_eq!(session.collection().repository().storage().write_count(), 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut session = session();
        session.begin_add();
        let created = session.submit(ParcelInput::new("Box", 1, 1.0)).unwrap();

        let mut prompts = Vec::new();
        let mut decline = |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        };
        assert!(!session.request_delete(&created.id, &mut decline).unwrap());
        assert_eq!(session.parcels().len(), 1);
        assert_eq!(prompts, vec![DELETE_PROMPT.to_string()]);

        let mut accept = |_: &str| true;
        assert!(session.request_delete(&created.id, &mut accept).unwrap());
        assert!(session.parcels().is_empty());
    }
}
