use duo_core::model::Account;

/// One ranked row on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub username: String,
    pub exp_label: String,
    pub row_class: &'static str,
}

#[must_use]
pub fn map_leaderboard_rows(accounts: &[Account]) -> Vec<LeaderboardRowVm> {
    accounts
        .iter()
        .enumerate()
        .map(|(index, account)| {
            let rank = index + 1;
            LeaderboardRowVm {
                rank,
                username: account.username.clone(),
                exp_label: format!("{} XP", account.exp),
                row_class: match rank {
                    1 => "rank rank--gold",
                    2 => "rank rank--silver",
                    3 => "rank rank--bronze",
                    _ => "rank",
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_core::model::{AccountId, Role};

    fn account(id: u64, exp: u64) -> Account {
        Account {
            id: AccountId::new(id),
            username: format!("user{id}"),
            email: String::new(),
            exp,
            role: Role::User,
            image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn podium_rows_get_their_own_classes() {
        let rows = map_leaderboard_rows(&[
            account(1, 500),
            account(2, 400),
            account(3, 300),
            account(4, 200),
        ]);
        assert_eq!(rows[0].row_class, "rank rank--gold");
        assert_eq!(rows[2].row_class, "rank rank--bronze");
        assert_eq!(rows[3].row_class, "rank");
        assert_eq!(rows[3].rank, 4);
        assert_eq!(rows[1].exp_label, "400 XP");
    }
}
