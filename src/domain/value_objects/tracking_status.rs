use serde::{Deserialize, Serialize};
use std::fmt;

/// ローカルブランチとリモートブランチの相対位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum TrackingStatus {
    /// 同じコミットを指している
    Equal,
    /// ローカルがリモートより進んでいる
    Ahead { commits: usize },
    /// ローカルがリモートより遅れている
    Behind { commits: usize },
    /// 双方に相手にないコミットがある
    Diverged { ahead: usize, behind: usize },
}

impl TrackingStatus {
    /// ahead/behindのコミット数から状態を決定
    pub fn from_counts(ahead: usize, behind: usize) -> Self {
        match (ahead, behind) {
            (0, 0) => Self::Equal,
            (ahead, 0) => Self::Ahead { commits: ahead },
            (0, behind) => Self::Behind { commits: behind },
            (ahead, behind) => Self::Diverged { ahead, behind },
        }
    }

    /// `git rev-list --left-right --count` の出力を解析
    ///
    /// 出力は "<ahead>\t<behind>" の形式
    pub fn parse_left_right_counts(output: &str) -> Option<Self> {
        let mut counts = output.split_whitespace().map(str::parse::<usize>);
        let ahead = counts.next()?.ok()?;
        let behind = counts.next()?.ok()?;
        if counts.next().is_some() {
            return None;
        }
        Some(Self::from_counts(ahead, behind))
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "up to date"),
            Self::Ahead { commits } => write!(f, "ahead by {commits}"),
            Self::Behind { commits } => write!(f, "behind by {commits}"),
            Self::Diverged { ahead, behind } => {
                write!(f, "diverged (ahead {ahead}, behind {behind})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts() {
        assert_eq!(TrackingStatus::from_counts(0, 0), TrackingStatus::Equal);
        assert_eq!(
            TrackingStatus::from_counts(2, 0),
            TrackingStatus::Ahead { commits: 2 }
        );
        assert_eq!(
            TrackingStatus::from_counts(0, 5),
            TrackingStatus::Behind { commits: 5 }
        );
        assert_eq!(
            TrackingStatus::from_counts(1, 3),
            TrackingStatus::Diverged {
                ahead: 1,
                behind: 3
            }
        );
    }

    #[test]
    fn test_parse_rev_list_output() {
        assert_eq!(
            TrackingStatus::parse_left_right_counts("3\t0\n"),
            Some(TrackingStatus::Ahead { commits: 3 })
        );
        assert_eq!(
            TrackingStatus::parse_left_right_counts("0\t0"),
            Some(TrackingStatus::Equal)
        );
        assert_eq!(TrackingStatus::parse_left_right_counts(""), None);
        assert_eq!(TrackingStatus::parse_left_right_counts("x\t1"), None);
        assert_eq!(TrackingStatus::parse_left_right_counts("1\t2\t3"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TrackingStatus::Equal.to_string(), "up to date");
        assert_eq!(
            TrackingStatus::Behind { commits: 4 }.to_string(),
            "behind by 4"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(TrackingStatus::Ahead { commits: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"relation": "ahead", "commits": 2}));
    }
}
