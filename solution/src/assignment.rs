use model::base_types::{PeriodIdx, RoomIdx, SectionIdx};

use std::fmt;

/// Placement of a section at a room beginning at a given period. One start
/// assignment expands into one [`PresentAssignment`] per period the meeting occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartAssignment {
    section: SectionIdx,
    room: RoomIdx,
    start_period: PeriodIdx,
}

impl StartAssignment {
    pub fn new(section: SectionIdx, room: RoomIdx, start_period: PeriodIdx) -> StartAssignment {
        StartAssignment {
            section,
            room,
            start_period,
        }
    }

    pub fn section(&self) -> SectionIdx {
        self.section
    }

    pub fn room(&self) -> RoomIdx {
        self.room
    }

    pub fn start_period(&self) -> PeriodIdx {
        self.start_period
    }
}

impl fmt::Display for StartAssignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {} starting {}",
            self.section, self.room, self.start_period
        )
    }
}

/// One period-slice of a [`StartAssignment`]'s occupancy. Derived by the schedule,
/// never created independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PresentAssignment {
    section: SectionIdx,
    room: RoomIdx,
    period: PeriodIdx,
    start_period: PeriodIdx,
}

impl PresentAssignment {
    pub(crate) fn new(
        section: SectionIdx,
        room: RoomIdx,
        period: PeriodIdx,
        start_period: PeriodIdx,
    ) -> PresentAssignment {
        PresentAssignment {
            section,
            room,
            period,
            start_period,
        }
    }

    pub fn section(&self) -> SectionIdx {
        self.section
    }

    pub fn room(&self) -> RoomIdx {
        self.room
    }

    pub fn period(&self) -> PeriodIdx {
        self.period
    }

    /// The placement this slice was expanded from.
    pub fn start_assignment(&self) -> StartAssignment {
        StartAssignment::new(self.section, self.room, self.start_period)
    }
}

impl fmt::Display for PresentAssignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} in {} during {}", self.section, self.room, self.period)
    }
}
