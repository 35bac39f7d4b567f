//! Counting-sort bucketing of incidences into CSR slices.

/// `edge` belongs to the list of `owner`; `other` is its opposite endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Incidence {
    pub(super) owner: u32,
    pub(super) other: u32,
    pub(super) edge: u32,
}

/// Flat incidence array grouped by owner.
#[derive(Debug, Clone, Default)]
pub(super) struct Buckets {
    /// `begin[v]..begin[v + 1]` is the slice of `v`; length `n + 1`.
    pub(super) begin: Vec<usize>,
    pub(super) edges: Vec<u32>,
}

impl Buckets {
    #[inline]
    pub(super) fn slice(&self, vertex: usize) -> &[u32] {
        &self.edges[self.begin[vertex]..self.begin[vertex + 1]]
    }
}

/// Stable counting sort of `items` by `key`, returning the begin offsets of
/// every key alongside the sorted items.
fn counting_sort(
    n: usize,
    items: &[Incidence],
    key: impl Fn(&Incidence) -> usize,
) -> (Vec<usize>, Vec<Incidence>) {
    let mut begin = vec![0usize; n + 1];
    for item in items {
        begin[key(item) + 1] += 1;
    }
    for v in 0..n {
        begin[v + 1] += begin[v];
    }

    // `begin[k]` doubles as the write cursor of key `k`
    let mut sorted = vec![
        Incidence {
            owner: 0,
            other: 0,
            edge: 0
        };
        items.len()
    ];
    for item in items {
        let cursor = &mut begin[key(item)];
        sorted[*cursor] = *item;
        *cursor += 1;
    }
    // every cursor now sits on the next key's start; shift them back
    for v in (1..n).rev() {
        begin[v] = begin[v - 1];
    }
    if n > 0 {
        begin[0] = 0;
    }
    (begin, sorted)
}

/// Groups `incidences` by owner, keeping input order inside a group, or
/// ordering each group by `other` when `sort_by_other` is set.
pub(super) fn bucket(n: usize, incidences: &[Incidence], sort_by_other: bool) -> Buckets {
    let (begin, sorted) = if sort_by_other {
        let (_, by_other) = counting_sort(n, incidences, |i| i.other as usize);
        counting_sort(n, &by_other, |i| i.owner as usize)
    } else {
        counting_sort(n, incidences, |i| i.owner as usize)
    };
    Buckets {
        begin,
        edges: sorted.into_iter().map(|i| i.edge).collect(),
    }
}
