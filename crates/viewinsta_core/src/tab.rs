#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Watch,
    Edit,
    Refer,
    Withdraw,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Watch, Tab::Edit, Tab::Refer, Tab::Withdraw];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Watch => "Watch Video",
            Tab::Edit => "Edit Image",
            Tab::Refer => "Refer & Earn",
            Tab::Withdraw => "Withdraw",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Watch => 0,
            Tab::Edit => 1,
            Tab::Refer => 2,
            Tab::Withdraw => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
