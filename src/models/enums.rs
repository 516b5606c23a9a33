//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// Book genre classification (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    ScienceFiction,
    Fantasy,
    Romance,
    Biography,
    History,
    Poetry,
    SelfHelp,
    Children,
    Textbook,
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "fiction",
            Genre::NonFiction => "non_fiction",
            Genre::Mystery => "mystery",
            Genre::ScienceFiction => "science_fiction",
            Genre::Fantasy => "fantasy",
            Genre::Romance => "romance",
            Genre::Biography => "biography",
            Genre::History => "history",
            Genre::Poetry => "poetry",
            Genre::SelfHelp => "self_help",
            Genre::Children => "children",
            Genre::Textbook => "textbook",
            Genre::Other => "other",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fiction" => Ok(Genre::Fiction),
            "non_fiction" => Ok(Genre::NonFiction),
            "mystery" => Ok(Genre::Mystery),
            "science_fiction" => Ok(Genre::ScienceFiction),
            "fantasy" => Ok(Genre::Fantasy),
            "romance" => Ok(Genre::Romance),
            "biography" => Ok(Genre::Biography),
            "history" => Ok(Genre::History),
            "poetry" => Ok(Genre::Poetry),
            "self_help" => Ok(Genre::SelfHelp),
            "children" => Ok(Genre::Children),
            "textbook" => Ok(Genre::Textbook),
            "other" => Ok(Genre::Other),
            _ => Err(format!("Invalid genre: {}", s)),
        }
    }
}

// SQLx conversions (stored as TEXT)
impl sqlx::Type<Postgres> for Genre {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Genre {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Genre {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of a listed book (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Worn,
    Used,
    Damaged,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like_new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Worn => "worn",
            Condition::Used => "used",
            Condition::Damaged => "damaged",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Worn => "Worn",
            Condition::Used => "Used",
            Condition::Damaged => "Damaged",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "new" => Ok(Condition::New),
            "like_new" => Ok(Condition::LikeNew),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "worn" => Ok(Condition::Worn),
            "used" => Ok(Condition::Used),
            "damaged" => Ok(Condition::Damaged),
            _ => Err(format!("Invalid condition: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for Condition {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Condition {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Condition {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// BorrowStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a borrow record.
///
/// Transitions are triggered exclusively by the lender:
/// `Requested -> Approved | Declined`, `Approved -> Returned`.
/// `Declined` and `Returned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BorrowStatus {
    Requested,
    Approved,
    Declined,
    Returned,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Requested => "requested",
            BorrowStatus::Approved => "approved",
            BorrowStatus::Declined => "declined",
            BorrowStatus::Returned => "returned",
        }
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(self, next: BorrowStatus) -> bool {
        matches!(
            (self, next),
            (BorrowStatus::Requested, BorrowStatus::Approved)
                | (BorrowStatus::Requested, BorrowStatus::Declined)
                | (BorrowStatus::Approved, BorrowStatus::Returned)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BorrowStatus::Declined | BorrowStatus::Returned)
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(BorrowStatus::Requested),
            "approved" => Ok(BorrowStatus::Approved),
            "declined" => Ok(BorrowStatus::Declined),
            "returned" => Ok(BorrowStatus::Returned),
            _ => Err(format!("Invalid borrow status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for BorrowStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BorrowStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BorrowStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_parses_known_codes() {
        assert_eq!("fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!("science_fiction".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert_eq!("SELF_HELP".parse::<Genre>().unwrap(), Genre::SelfHelp);
        assert!("space_opera".parse::<Genre>().is_err());
    }

    #[test]
    fn condition_accepts_spaced_labels() {
        assert_eq!("like_new".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!("Like New".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert!("mint".parse::<Condition>().is_err());
    }

    #[test]
    fn enum_codes_round_trip() {
        for genre in ["fiction", "mystery", "textbook", "other"] {
            assert_eq!(genre.parse::<Genre>().unwrap().as_str(), genre);
        }
        for condition in ["new", "like_new", "worn", "damaged"] {
            assert_eq!(condition.parse::<Condition>().unwrap().as_str(), condition);
        }
        for status in ["requested", "approved", "declined", "returned"] {
            assert_eq!(status.parse::<BorrowStatus>().unwrap().as_str(), status);
        }
    }

    #[test]
    fn lender_transitions_are_the_only_legal_ones() {
        use BorrowStatus::*;

        let all = [Requested, Approved, Declined, Returned];
        for from in all {
            for to in all {
                let legal = matches!((from, to), (Requested, Approved) | (Requested, Declined) | (Approved, Returned));
                assert_eq!(from.can_transition_to(to), legal, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn declined_and_returned_are_terminal() {
        assert!(!BorrowStatus::Requested.is_terminal());
        assert!(!BorrowStatus::Approved.is_terminal());
        assert!(BorrowStatus::Declined.is_terminal());
        assert!(BorrowStatus::Returned.is_terminal());
    }
}
