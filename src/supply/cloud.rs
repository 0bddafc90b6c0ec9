//! Clouds: per-round student offers refilled from the sack.

use serde::{Deserialize, Serialize};

use super::sack::Sack;
use crate::core::{GameError, GameResult, Pawns};

/// A single cloud tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    students: Pawns,
}

impl Cloud {
    /// Students currently on the cloud.
    #[must_use]
    pub fn students(&self) -> &Pawns {
        &self.students
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Outcome of a refill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudFill {
    /// Students placed across all clouds.
    pub placed: usize,
    /// Students that could not be placed because the sack ran out.
    pub shortfall: usize,
}

impl CloudFill {
    /// True when every emptied cloud received its full complement.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shortfall == 0
    }
}

/// The fixed set of clouds for a match.
#[derive(Clone, Debug)]
pub struct CloudManager {
    clouds: Vec<Cloud>,
    students_on_cloud: u8,
}

impl CloudManager {
    /// Create `count` empty clouds that each hold `students_on_cloud` students.
    #[must_use]
    pub fn new(count: usize, students_on_cloud: u8) -> Self {
        Self {
            clouds: vec![Cloud::default(); count],
            students_on_cloud,
        }
    }

    /// Refill every empty cloud from the sack.
    ///
    /// An exhausted sack leaves clouds partially filled; the shortfall is
    /// reported rather than treated as an error.
    pub fn fill_clouds(&mut self, sack: &mut Sack) -> CloudFill {
        let mut fill = CloudFill {
            placed: 0,
            shortfall: 0,
        };
        let wanted = self.students_on_cloud as usize;

        for cloud in self.clouds.iter_mut().filter(|c| c.is_empty()) {
            let drawn = sack.extract(wanted);
            fill.placed += drawn.total();
            fill.shortfall += wanted - drawn.total();
            cloud.students = drawn;
        }
        fill
    }

    /// Empty a cloud and return its students.
    pub fn take(&mut self, index: usize) -> GameResult<Pawns> {
        let cloud = self
            .clouds
            .get_mut(index)
            .ok_or(GameError::OutOfBounds("cloud index"))?;
        if cloud.is_empty() {
            return Err(GameError::InvalidState("cloud already taken this round"));
        }
        Ok(cloud.students.take())
    }

    /// Get a cloud by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cloud> {
        self.clouds.get(index)
    }

    /// All clouds in table order.
    #[must_use]
    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
