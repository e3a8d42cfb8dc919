use crate::matrix::{City, NumCities};

/// Set of cities placed on the current partial route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedSet {
    flags: Vec<bool>,
    len: NumCities,
}

impl VisitedSet {
    /// Empty set over the cities `0..capacity`
    pub fn new(capacity: NumCities) -> Self {
        Self {
            flags: vec![false; capacity],
            len: 0,
        }
    }

    pub fn from_cities<I: IntoIterator<Item = City>>(capacity: NumCities, cities: I) -> Self {
        let mut set = Self::new(capacity);
        for u in cities {
            set.insert(u);
        }
        set
    }

    pub fn capacity(&self) -> NumCities {
        self.flags.len()
    }

    pub fn len(&self) -> NumCities {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true iff every city is in the set
    pub fn is_full(&self) -> bool {
        self.len == self.flags.len()
    }

    #[inline(always)]
    pub fn contains(&self, u: City) -> bool {
        self.flags[u]
    }

    /// Returns true iff `u` was not contained before
    pub fn insert(&mut self, u: City) -> bool {
        let was_new = !std::mem::replace(&mut self.flags[u], true);
        self.len += was_new as NumCities;
        was_new
    }

    /// Returns true iff `u` was contained before
    pub fn remove(&mut self, u: City) -> bool {
        let was_set = std::mem::replace(&mut self.flags[u], false);
        self.len -= was_set as NumCities;
        was_set
    }

    /// Cities not in the set, in ascending order
    pub fn iter_unvisited(&self) -> impl Iterator<Item = City> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(u, &set)| (!set).then_some(u))
    }

    /// Smallest city `>= from` which is not in the set
    pub fn next_unvisited(&self, from: City) -> Option<City> {
        (from..self.flags.len()).find(|&u| !self.flags[u])
    }
}
