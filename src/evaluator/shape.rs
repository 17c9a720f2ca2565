use crate::cards::{Card, Rank, Suit};

/// Pre-computed structure of a 5-card hand: rank multiplicities, flush suit
/// and straight high card. Built once per hand, consumed by the classifier.
#[derive(Debug, Clone)]
pub(crate) struct HandShape {
    /// All five ranks, descending.
    pub(crate) ranks_desc: [Rank; 5],
    /// (rank, count) groups, sorted by count descending then rank descending.
    /// This ordering decides which pair is "high" in two pair and which group
    /// is the quad/triple when multiplicities collide.
    pub(crate) groups: Vec<(Rank, u8)>,
    pub(crate) flush_suit: Option<Suit>,
    /// Straight high card; Five for the wheel (A-2-3-4-5).
    pub(crate) straight_high: Option<Rank>,
}

impl HandShape {
    pub(crate) fn of(cards: &[Card; 5]) -> Self {
        let mut ranks_desc = [
            cards[0].rank(),
            cards[1].rank(),
            cards[2].rank(),
            cards[3].rank(),
            cards[4].rank(),
        ];
        ranks_desc.sort_by(|a, b| b.cmp(a));

        let mut counts = [0u8; 15];
        for r in ranks_desc {
            counts[r.value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .filter_map(|&r| {
                let c = counts[r.value() as usize];
                (c > 0).then_some((r, c))
            })
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let first_suit = cards[0].suit();
        let flush_suit = cards.iter().all(|c| c.suit() == first_suit).then_some(first_suit);

        Self { ranks_desc, groups, flush_suit, straight_high: straight_high(&ranks_desc) }
    }

    pub(crate) fn group_of(&self, count: u8) -> Option<Rank> {
        self.groups.iter().find(|&&(_, c)| c == count).map(|&(r, _)| r)
    }

    /// Ranks appearing with the given multiplicity, descending.
    pub(crate) fn ranks_with_count(&self, count: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |&&(_, c)| c == count).map(|&(r, _)| r)
    }
}

fn straight_high(ranks_desc: &[Rank; 5]) -> Option<Rank> {
    let consecutive =
        (0..4).all(|i| ranks_desc[i].value() == ranks_desc[i + 1].value() + 1);
    if consecutive {
        return Some(ranks_desc[0]);
    }
    // Wheel: A-5-4-3-2 once sorted descending. The Five is high.
    if ranks_desc
        == &[Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two]
    {
        return Some(Rank::Five);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn shape(s: &str) -> HandShape {
        let cards: [Card; 5] = parse_cards(s).unwrap().try_into().unwrap();
        HandShape::of(&cards)
    }

    #[test]
    fn groups_sorted_by_count_then_rank() {
        let sh = shape("Ks Kh 2c 2d Ad");
        assert_eq!(sh.groups[0], (Rank::King, 2));
        assert_eq!(sh.groups[1], (Rank::Two, 2));
        assert_eq!(sh.groups[2], (Rank::Ace, 1));
    }

    #[test]
    fn flush_detection_requires_all_five() {
        assert!(shape("2h 5h 9h Jh Ah").flush_suit.is_some());
        assert!(shape("2h 5h 9h Jh As").flush_suit.is_none());
    }

    #[test]
    fn straight_high_is_top_card() {
        assert_eq!(shape("9s 8h 7d 6c 5s").straight_high, Some(Rank::Nine));
        assert_eq!(shape("As Kh Qd Jc 10s").straight_high, Some(Rank::Ace));
        assert_eq!(shape("As Kh Qd Jc 9s").straight_high, None);
    }

    #[test]
    fn wheel_high_card_is_five() {
        assert_eq!(shape("Ah 2s 3d 4c 5h").straight_high, Some(Rank::Five));
    }

    #[test]
    fn paired_ranks_never_form_a_straight() {
        assert_eq!(shape("6s 6h 5d 4c 3s").straight_high, None);
    }

    #[test]
    fn ranks_with_count_descending() {
        let sh = shape("Js Jh 9d 7c 3s");
        let kickers: Vec<Rank> = sh.ranks_with_count(1).collect();
        assert_eq!(kickers, vec![Rank::Nine, Rank::Seven, Rank::Three]);
        assert_eq!(sh.group_of(2), Some(Rank::Jack));
    }
}
