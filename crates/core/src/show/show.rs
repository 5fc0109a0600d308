use crate::Cue;

/// Rooms in the order a visitor walks through them.
pub const DEFAULT_ROOM_ORDER: [&str; 9] = [
    "Reception",
    "Aljuhfa Path",
    "Immersive Room",
    "Road to Yemen",
    "Yemen Market",
    "Road to North",
    "Levant Souq",
    "Fabric Room",
    "Mecca",
];

/// The plan for one room: its name and its cues in list order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoomPlan {
    pub name: String,
    pub cues: Vec<Cue>,
}

impl RoomPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cues: Vec::new(),
        }
    }

    pub fn with_cues(name: impl Into<String>, cues: Vec<Cue>) -> Self {
        Self {
            name: name.into(),
            cues,
        }
    }

    pub fn add_cue(&mut self, cue: Cue) -> usize {
        self.cues.push(cue);
        self.cues.len() - 1
    }

    pub fn remove_cue(&mut self, index: usize) -> Option<Cue> {
        if index < self.cues.len() {
            Some(self.cues.remove(index))
        } else {
            None
        }
    }

    /// Replace the whole cue list.
    pub fn set_cues(&mut self, cues: Vec<Cue>) {
        self.cues = cues;
    }

    /// Names a cue at `index` may wait on: every non-empty name above it,
    /// nearest first and without repeats.
    pub fn dependency_candidates(&self, index: usize) -> Vec<&str> {
        let end = index.min(self.cues.len());
        let mut names: Vec<&str> = Vec::new();
        for cue in self.cues[..end].iter().rev() {
            if !cue.name.is_empty() && !names.contains(&cue.name.as_str()) {
                names.push(&cue.name);
            }
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// The whole show: every room, in show order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShowPlan {
    pub rooms: Vec<RoomPlan>,
}

impl ShowPlan {
    /// An empty room for each name in `order`.
    pub fn with_rooms<S: AsRef<str>>(order: &[S]) -> Self {
        Self {
            rooms: order.iter().map(|name| RoomPlan::new(name.as_ref())).collect(),
        }
    }

    pub fn room(&self, name: &str) -> Option<&RoomPlan> {
        self.rooms.iter().find(|room| room.name == name)
    }

    pub fn room_mut(&mut self, name: &str) -> Option<&mut RoomPlan> {
        self.rooms.iter_mut().find(|room| room.name == name)
    }

    pub fn cue_count(&self) -> usize {
        self.rooms.iter().map(|room| room.cues.len()).sum()
    }

    /// Lay this plan out against a fixed room order.
    ///
    /// Every name in `order` gets exactly one room. When the document holds
    /// the same room more than once the last copy wins; rooms that are not in
    /// `order` are dropped.
    pub fn arranged<S: AsRef<str>>(&self, order: &[S]) -> ShowPlan {
        for room in &self.rooms {
            if !order.iter().any(|name| name.as_ref() == room.name) {
                log::warn!("dropping room {:?}: not part of the show order", room.name);
            }
        }

        let rooms = order
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let cues = self
                    .rooms
                    .iter()
                    .rev()
                    .find(|room| room.name == name)
                    .map(|room| room.cues.clone())
                    .unwrap_or_default();
                RoomPlan::with_cues(name, cues)
            })
            .collect();

        ShowPlan { rooms }
    }
}
