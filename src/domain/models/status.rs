/// Resting or waiting state of a single request slot in a view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
}

impl Status {
    pub fn is_loading(&self) -> bool {
        return *self == Status::Loading;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum InputStatus {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// A PDF is selected.
    Valid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ButtonStatus {
    #[default]
    Ready,
    Uploading,
    Success,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteStatus {
    #[default]
    Idle,
    Deleting,
}
