//! Recency ordering for cache entries.
//!
//! Items live in an arena of slots and are chained oldest to newest through slot ids, so moving
//! an item to the newest end or dropping the oldest one never touches more than three slots.
//! Vacated slots go on a free list and are handed out again before the arena grows.

/// Stable handle to an item in a [`RecencyList`].
///
/// A handle stays valid until its item is removed. After that the slot may be reused by another
/// item, so callers must drop handles when they remove items.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SlotId(usize);

#[derive(Debug)]
pub(crate) struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    oldest: Option<SlotId>,
    newest: Option<SlotId>,
    free: Option<SlotId>,
    len: usize,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Link<T>),
    Vacant { next_free: Option<SlotId> },
}

#[derive(Debug)]
struct Link<T> {
    item: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub(crate) fn new() -> Self {
        RecencyList {
            slots: Vec::new(),
            oldest: None,
            newest: None,
            free: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn push_newest(&mut self, item: T) -> SlotId {
        let link = Link {
            item,
            prev: None,
            next: None,
        };
        let id = match self.free {
            Some(id) => {
                let slot = &mut self.slots[id.0];
                if let Slot::Vacant { next_free } = slot {
                    self.free = *next_free;
                }
                *slot = Slot::Occupied(link);
                id
            }
            None => {
                self.slots.push(Slot::Occupied(link));
                SlotId(self.slots.len() - 1)
            }
        };
        self.len += 1;
        self.link_newest(id);
        id
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.link(id).map(|link| &link.item)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.link_mut(id).map(|link| &mut link.item)
    }

    pub(crate) fn oldest(&self) -> Option<&T> {
        self.get(self.oldest?)
    }

    pub(crate) fn newest(&self) -> Option<&T> {
        self.get(self.newest?)
    }

    pub(crate) fn set_newest(&mut self, id: SlotId) -> Option<()> {
        if self.newest == Some(id) {
            return self.link(id).map(|_| ());
        }
        self.unlink(id)?;
        self.link_newest(id)
    }

    pub(crate) fn take_oldest(&mut self) -> Option<T> {
        let oldest = self.oldest?;
        self.remove(oldest)
    }

    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;

        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        let link = match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(link) => link,
            Slot::Vacant { .. } => unreachable!("unlinked slot must be occupied"),
        };
        self.free = Some(id);
        self.len -= 1;

        Some(link.item)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.oldest = None;
        self.newest = None;
        self.free = None;
        self.len = 0;
    }

    /// Items from oldest to newest.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.oldest,
            remaining: self.len,
        }
    }

    fn link(&self, id: SlotId) -> Option<&Link<T>> {
        match self.slots.get(id.0)? {
            Slot::Occupied(link) => Some(link),
            Slot::Vacant { .. } => None,
        }
    }

    fn link_mut(&mut self, id: SlotId) -> Option<&mut Link<T>> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(link) => Some(link),
            Slot::Vacant { .. } => None,
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let link = self.link(id)?;
        let (prev, next) = (link.prev, link.next);

        match prev {
            Some(prev) => self.link_mut(prev)?.next = next,
            None => self.oldest = next,
        }
        match next {
            Some(next) => self.link_mut(next)?.prev = prev,
            None => self.newest = prev,
        }

        Some(())
    }

    fn link_newest(&mut self, id: SlotId) -> Option<()> {
        let previous_newest = self.newest;
        let link = self.link_mut(id)?;
        link.prev = previous_newest;
        link.next = None;

        match previous_newest {
            Some(newest) => self.link_mut(newest)?.next = Some(id),
            None => self.oldest = Some(id),
        }
        self.newest = Some(id);

        Some(())
    }
}

pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.list.link(self.cursor?)?;
        self.cursor = link.next;
        self.remaining -= 1;
        Some(&link.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(list: &mut RecencyList<T>) -> Vec<T> {
        std::iter::from_fn(|| list.take_oldest()).collect()
    }

    #[test]
    fn empty_take_is_none() {
        let mut list: RecencyList<u8> = RecencyList::new();
        assert_eq!(list.take_oldest(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn take_in_insertion_order() {
        let mut list = RecencyList::new();
        list.push_newest(1);
        list.push_newest(2);
        list.push_newest(3);

        assert_eq!(list.oldest(), Some(&1));
        assert_eq!(list.newest(), Some(&3));
        assert_eq!(drain(&mut list), vec![1, 2, 3]);
        assert_eq!(list.oldest(), None);
        assert_eq!(list.newest(), None);
    }

    #[test]
    fn iter_runs_oldest_to_newest() {
        let mut list = RecencyList::new();
        let a = list.push_newest('a');
        list.push_newest('b');
        list.push_newest('c');
        list.set_newest(a);

        let iter = list.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.copied().collect::<String>(), "bca");
    }

    #[cfg(test)]
    mod set_newest {
        use super::*;

        #[test]
        fn vacant_id() {
            let mut list = RecencyList::new();
            let id = list.push_newest(42);
            list.remove(id);

            assert_eq!(list.set_newest(id), None);
        }

        #[test]
        fn unknown_id() {
            let mut list: RecencyList<u8> = RecencyList::new();
            assert_eq!(list.set_newest(SlotId(7)), None);
        }

        #[test]
        fn one_item() {
            let mut list = RecencyList::new();
            let id = list.push_newest(42);

            assert_eq!(list.set_newest(id), Some(()));
            assert_eq!(drain(&mut list), vec![42]);
        }

        #[test]
        fn oldest_item() {
            let mut list = RecencyList::new();
            let first = list.push_newest(42);
            list.push_newest(43);

            assert_eq!(list.set_newest(first), Some(()));
            assert_eq!(list.take_oldest(), Some(43));
            assert_eq!(list.take_oldest(), Some(42));
        }

        #[test]
        fn middle_item() {
            let mut list = RecencyList::new();
            list.push_newest(42);
            let middle = list.push_newest(43);
            list.push_newest(44);

            list.set_newest(middle);

            assert_eq!(drain(&mut list), vec![42, 44, 43]);
        }

        #[test]
        fn newest_item_is_a_no_op() {
            let mut list = RecencyList::new();
            list.push_newest(1);
            let newest = list.push_newest(2);

            assert_eq!(list.set_newest(newest), Some(()));
            assert_eq!(drain(&mut list), vec![1, 2]);
        }
    }

    #[cfg(test)]
    mod remove {
        use super::*;

        #[test]
        fn middle_item_relinks_neighbours() {
            let mut list = RecencyList::new();
            list.push_newest(1);
            let middle = list.push_newest(2);
            list.push_newest(3);

            assert_eq!(list.remove(middle), Some(2));
            assert_eq!(list.len(), 2);
            assert_eq!(list.get(middle), None);
            assert_eq!(drain(&mut list), vec![1, 3]);
        }

        #[test]
        fn twice_is_none() {
            let mut list = RecencyList::new();
            let id = list.push_newest(1);

            assert_eq!(list.remove(id), Some(1));
            assert_eq!(list.remove(id), None);
            assert_eq!(list.len(), 0);
        }

        #[test]
        fn vacated_slots_are_reused() {
            let mut list = RecencyList::new();
            let a = list.push_newest('a');
            let b = list.push_newest('b');
            list.remove(a);
            list.remove(b);

            let c = list.push_newest('c');
            let d = list.push_newest('d');
            assert_eq!(c, b);
            assert_eq!(d, a);
            assert_eq!(list.slots.len(), 2);
            assert_eq!(drain(&mut list), vec!['c', 'd']);
        }
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut list = RecencyList::new();
        let id = list.push_newest(String::from("a"));
        if let Some(item) = list.get_mut(id) {
            item.push('b');
        }
        assert_eq!(list.get(id).map(String::as_str), Some("ab"));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut list = RecencyList::new();
        list.push_newest(1);
        list.push_newest(2);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        let id = list.push_newest(3);
        assert_eq!(id, SlotId(0));
    }
}
