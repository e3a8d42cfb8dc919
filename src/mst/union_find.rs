use crate::matrix::City;

/// Disjoint sets over `0..n` with path compression and union by rank.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<City>,
    rank: Vec<u8>,
    number_of_components: usize,
}

impl UnionFind {
    /// Every element starts in its own singleton set
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            number_of_components: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn number_of_components(&self) -> usize {
        self.number_of_components
    }

    /// Returns the representative of the set containing `u`
    pub fn find(&mut self, u: City) -> City {
        let mut root = u;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // compress the path towards the root
        let mut u = u;
        while self.parent[u] != root {
            let next = self.parent[u];
            self.parent[u] = root;
            u = next;
        }

        root
    }

    pub fn same_set(&mut self, u: City, v: City) -> bool {
        self.find(u) == self.find(v)
    }

    /// Merges the sets of `u` and `v`. Returns false iff they already were in the same set.
    pub fn union(&mut self, u: City, v: City) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }

        let (small, large) = if self.rank[ru] < self.rank[rv] {
            (ru, rv)
        } else {
            (rv, ru)
        };

        self.parent[small] = large;
        if self.rank[small] == self.rank[large] {
            self.rank[large] += 1;
        }

        self.number_of_components -= 1;
        true
    }
}
