/// One column of the RSVP sheet, in persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Timestamp,
    FullName,
    Email,
    Phone,
    FriendOf,
    HasPlusOne,
    PlusOneName,
    YourChurch,
    YourReception,
    PlusOneChurch,
    PlusOneReception,
    ChurchGuestCount,
    ReceptionGuestCount,
    YourLunchDietary,
    PlusOneLunchDietary,
    YourDinnerDietary,
    PlusOneDinnerDietary,
    Song,
    Message,
}

impl RecordField {
    /// Sheet column order.
    pub const COLUMNS: [Self; 19] = [
        Self::Timestamp,
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::FriendOf,
        Self::HasPlusOne,
        Self::PlusOneName,
        Self::YourChurch,
        Self::YourReception,
        Self::PlusOneChurch,
        Self::PlusOneReception,
        Self::ChurchGuestCount,
        Self::ReceptionGuestCount,
        Self::YourLunchDietary,
        Self::PlusOneLunchDietary,
        Self::YourDinnerDietary,
        Self::PlusOneDinnerDietary,
        Self::Song,
        Self::Message,
    ];

    /// Column title written to the header row, also used in error messages.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Timestamp => "Timestamp",
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::FriendOf => "Friend Of",
            Self::HasPlusOne => "Has Plus One",
            Self::PlusOneName => "Plus One Name",
            Self::YourChurch => "Your Church",
            Self::YourReception => "Your Reception",
            Self::PlusOneChurch => "Plus One Church",
            Self::PlusOneReception => "Plus One Reception",
            Self::ChurchGuestCount => "Church Guest Count",
            Self::ReceptionGuestCount => "Reception Guest Count",
            Self::YourLunchDietary => "Your Lunch Dietary",
            Self::PlusOneLunchDietary => "Plus One Lunch Dietary",
            Self::YourDinnerDietary => "Your Dinner Dietary",
            Self::PlusOneDinnerDietary => "Plus One Dinner Dietary",
            Self::Song => "Song Request",
            Self::Message => "Message",
        }
    }

    /// Key of the field in the JSON body posted by the form.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::FriendOf => "friendOf",
            Self::HasPlusOne => "hasPlusOne",
            Self::PlusOneName => "plusOneName",
            Self::YourChurch => "yourChurch",
            Self::YourReception => "yourReception",
            Self::PlusOneChurch => "plusOneChurch",
            Self::PlusOneReception => "plusOneReception",
            Self::ChurchGuestCount => "churchGuestCount",
            Self::ReceptionGuestCount => "receptionGuestCount",
            Self::YourLunchDietary => "yourLunchDietary",
            Self::PlusOneLunchDietary => "plusOneLunchDietary",
            Self::YourDinnerDietary => "yourDinnerDietary",
            Self::PlusOneDinnerDietary => "plusOneDinnerDietary",
            Self::Song => "song",
            Self::Message => "message",
        }
    }

    /// Position of this field in [`Self::COLUMNS`].
    #[must_use]
    pub const fn column_index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}
