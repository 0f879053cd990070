use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FriendBalance {
    pub(crate) name: String,
    pub(crate) avatar: String,
    /// Positive: the friend owes the user. Negative: the user owes the friend.
    pub(crate) owes: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BalanceDirection {
    OwesYou,
    YouOwe,
    Even,
}

impl FriendBalance {
    pub(crate) fn new(name: &str, avatar: &str, owes: Decimal) -> Self {
        Self {
            name: name.to_string(),
            avatar: avatar.to_string(),
            owes,
        }
    }

    pub(crate) fn direction(&self) -> BalanceDirection {
        if self.owes > Decimal::ZERO {
            BalanceDirection::OwesYou
        } else if self.owes < Decimal::ZERO {
            BalanceDirection::YouOwe
        } else {
            BalanceDirection::Even
        }
    }

    /// Net of all friend balances: what the user is owed minus what they owe.
    pub(crate) fn net(friends: &[FriendBalance]) -> Decimal {
        friends.iter().map(|f| f.owes).sum()
    }
}
