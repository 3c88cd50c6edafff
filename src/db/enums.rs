use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Text-backed enums are stored as their `as_str` value.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($value => Ok($name::$variant),)+
                    other => Err(format!(
                        "Unrecognized {} '{}'",
                        stringify!($name),
                        other
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$name>().map_err(|e| e.into())
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum UserRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "superAdmin", alias = "super_admin")]
    SuperAdmin,
}

text_enum!(UserRole {
    User => "user",
    Admin => "admin",
    SuperAdmin => "super_admin",
});

impl UserRole {
    /// Admins and super admins may create, change and delete portal content.
    pub fn can_manage_content(&self) -> bool {
        *self >= UserRole::Admin
    }

    pub fn can_manage_users(&self) -> bool {
        *self == UserRole::SuperAdmin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Announcement,
    Event,
    Policy,
    Achievement,
    General,
}

text_enum!(NewsCategory {
    Announcement => "announcement",
    Event => "event",
    Policy => "policy",
    Achievement => "achievement",
    General => "general",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

text_enum!(EmploymentType {
    FullTime => "full_time",
    PartTime => "part_time",
    Contract => "contract",
    Internship => "internship",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Closed,
}

text_enum!(JobStatus {
    Open => "open",
    Closed => "closed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

text_enum!(ApplicationStatus {
    Pending => "pending",
    Reviewed => "reviewed",
    Shortlisted => "shortlisted",
    Rejected => "rejected",
    Hired => "hired",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum LeaveReason {
    Resignation,
    Retirement,
    Termination,
    ContractEnd,
    Other,
}

text_enum!(LeaveReason {
    Resignation => "resignation",
    Retirement => "retirement",
    Termination => "termination",
    ContractEnd => "contract_end",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

text_enum!(TrainingStatus {
    Planned => "planned",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(!UserRole::User.can_manage_content());
        assert!(UserRole::Admin.can_manage_content());
        assert!(UserRole::SuperAdmin.can_manage_content());
        assert!(!UserRole::Admin.can_manage_users());
        assert!(UserRole::SuperAdmin.can_manage_users());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&UserRole::SuperAdmin).unwrap(),
            "\"superAdmin\""
        );
        let parsed: UserRole = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(parsed, UserRole::SuperAdmin);
        assert_eq!(UserRole::SuperAdmin.as_str(), "super_admin");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Event".parse::<NewsCategory>(), Ok(NewsCategory::Event));
        assert_eq!(
            " contract_end ".parse::<LeaveReason>(),
            Ok(LeaveReason::ContractEnd)
        );
        assert!("weekly".parse::<NewsCategory>().is_err());
    }

    #[test]
    fn test_all_variants_round_trip_through_str() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().as_ref(), Ok(status));
        }
        for kind in EmploymentType::ALL {
            assert_eq!(kind.to_string().parse::<EmploymentType>().as_ref(), Ok(kind));
        }
    }
}
