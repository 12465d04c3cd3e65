//! Vehicle type with a home depot and a stop limit.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A vehicle (driver) that starts and ends its route at its own depot.
///
/// `capacity` is the maximum number of stops the vehicle may serve; every
/// stop counts as one unit.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Vehicle;
///
/// let v = Vehicle::new(0, 4, 12);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.depot(), 4);
/// assert_eq!(v.capacity(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    depot: usize,
    capacity: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given ID, depot node and stop capacity.
    pub fn new(id: usize, depot: usize, capacity: usize) -> Self {
        Self {
            id,
            depot,
            capacity,
        }
    }

    /// Builds a fleet from parallel depot and capacity arrays.
    ///
    /// Vehicle `i` gets `depots[i]` as its home and `capacities[i]` as its
    /// stop limit.
    ///
    /// ```
    /// use u_fleet::models::Vehicle;
    ///
    /// let fleet = Vehicle::fleet(&[0, 1], &[3, 5]).unwrap();
    /// assert_eq!(fleet[1], Vehicle::new(1, 1, 5));
    /// ```
    pub fn fleet(depots: &[usize], capacities: &[usize]) -> Result<Vec<Self>, ConfigurationError> {
        if depots.len() != capacities.len() {
            return Err(ConfigurationError::MismatchedFleet {
                depots: depots.len(),
                capacities: capacities.len(),
            });
        }
        Ok(depots
            .iter()
            .zip(capacities)
            .enumerate()
            .map(|(id, (&depot, &capacity))| Self::new(id, depot, capacity))
            .collect())
    }

    /// Vehicle ID (its index in the fleet).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Node where the route starts and ends.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Maximum number of stops on this vehicle's route.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
