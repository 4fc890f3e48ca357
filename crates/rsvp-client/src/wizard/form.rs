use rsvp_core::model::Relation;

/// Whose attendance a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    You,
    PlusOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Church,
    Reception,
}

/// Attendance flags and dietary notes for one party.
///
/// Dietary text is kept even while the matching event is deselected; it is
/// only ignored when the submission is collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSelection {
    pub church: bool,
    pub reception: bool,
    pub lunch_dietary: String,
    pub dinner_dietary: String,
}

impl EventSelection {
    #[must_use]
    pub fn attends_any(&self) -> bool {
        self.church || self.reception
    }

    #[must_use]
    pub fn attends(&self, event: Event) -> bool {
        match event {
            Event::Church => self.church,
            Event::Reception => self.reception,
        }
    }

    fn set(&mut self, event: Event, attending: bool) {
        match event {
            Event::Church => self.church = attending,
            Event::Reception => self.reception = attending,
        }
    }

    fn note_mut(&mut self, event: Event) -> &mut String {
        match event {
            Event::Church => &mut self.lunch_dietary,
            Event::Reception => &mut self.dinner_dietary,
        }
    }
}

/// Everything the guest has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub friend_of: Option<Relation>,
    pub has_plus_one: Option<bool>,
    pub plus_one_name: String,
    pub you: EventSelection,
    pub plus_one: EventSelection,
    pub song: String,
    pub message: String,
}

/// A single edit made by the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    FullName(String),
    Email(String),
    Phone(String),
    FriendOf(Relation),
    HasPlusOne(bool),
    PlusOneName(String),
    Attendance {
        party: Party,
        event: Event,
        attending: bool,
    },
    Dietary {
        party: Party,
        event: Event,
        note: String,
    },
    Song(String),
    Message(String),
}

impl FormState {
    #[must_use]
    pub fn brings_plus_one(&self) -> bool {
        self.has_plus_one == Some(true)
    }

    #[must_use]
    pub fn party(&self, party: Party) -> &EventSelection {
        match party {
            Party::You => &self.you,
            Party::PlusOne => &self.plus_one,
        }
    }

    fn party_mut(&mut self, party: Party) -> &mut EventSelection {
        match party {
            Party::You => &mut self.you,
            Party::PlusOne => &mut self.plus_one,
        }
    }

    /// ## Summary
    /// Applies one edit.
    ///
    /// Answering "no" to the plus-one question clears the companion's name
    /// and deselects both of their events.
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::FullName(value) => self.full_name = value,
            FieldChange::Email(value) => self.email = value,
            FieldChange::Phone(value) => self.phone = value,
            FieldChange::FriendOf(relation) => self.friend_of = Some(relation),
            FieldChange::HasPlusOne(brings) => {
                self.has_plus_one = Some(brings);
                if !brings {
                    self.plus_one_name.clear();
                    self.plus_one.set(Event::Church, false);
                    self.plus_one.set(Event::Reception, false);
                }
            }
            FieldChange::PlusOneName(value) => self.plus_one_name = value,
            FieldChange::Attendance {
                party,
                event,
                attending,
            } => self.party_mut(party).set(event, attending),
            FieldChange::Dietary { party, event, note } => {
                *self.party_mut(party).note_mut(event) = note;
            }
            FieldChange::Song(value) => self.song = value,
            FieldChange::Message(value) => self.message = value,
        }
    }
}
