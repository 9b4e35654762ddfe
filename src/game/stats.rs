use std::fmt;
use std::time::Duration;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    SolvedFormula,
    SolvedNoSolution,
    Revealed,
    Skipped,
    /// The player quit during this round; excluded from statistics
    Stopped,
}

impl RoundStatus {
    pub fn is_solved(self) -> bool {
        matches!(self, RoundStatus::SolvedFormula | RoundStatus::SolvedNoSolution)
    }

    /// What the round was solved by, if it was solved
    pub fn solved_via(self) -> Option<&'static str> {
        match self {
            RoundStatus::SolvedFormula => Some("formula"),
            RoundStatus::SolvedNoSolution => Some("no-solution"),
            _ => None,
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            RoundStatus::SolvedFormula => "solved-formula",
            RoundStatus::SolvedNoSolution => "solved-no-solution",
            RoundStatus::Revealed => "revealed",
            RoundStatus::Skipped => "skipped",
            RoundStatus::Stopped => "stopped",
        };
        write!(f, "{}", label)
    }
}

/// One played round as it appears in the session report
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    pub seqno: u32,
    pub question: String,
    pub status: RoundStatus,
    pub time: Duration,
    /// Submissions made, not counting commands
    pub attempts: u32,
    pub used_help: bool,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let solved = match self.status {
            RoundStatus::Stopped => "-",
            s if s.is_solved() => "Yes",
            _ => "No",
        };
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}, {}",
            self.seqno,
            self.question,
            self.status,
            solved,
            format_duration(self.time),
            self.attempts,
            if self.used_help { "Yes" } else { "No" },
            self.status.solved_via().unwrap_or("")
        )
    }
}

/// Aggregate performance over a session's rounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub played: usize,
    pub solved: usize,
    pub skipped: usize,
    pub revealed: usize,
    pub fastest: Duration,
    pub average: Duration,
}

impl SessionStats {
    /// Summarize every round except the one the player stopped in
    pub fn from_records(records: &[RoundRecord]) -> Self {
        let eligible: Vec<&RoundRecord> = records
            .iter()
            .filter(|r| r.status != RoundStatus::Stopped)
            .collect();

        let count = |status: RoundStatus| eligible.iter().filter(|r| r.status == status).count();
        let times: Vec<Duration> = eligible.iter().map(|r| r.time).collect();
        let total: Duration = times.iter().sum();

        Self {
            played: eligible.len(),
            solved: eligible.iter().filter(|r| r.status.is_solved()).count(),
            skipped: count(RoundStatus::Skipped),
            revealed: count(RoundStatus::Revealed),
            fastest: times.iter().min().copied().unwrap_or_default(),
            average: if times.is_empty() {
                Duration::ZERO
            } else {
                total.div_f64(times.len() as f64)
            },
        }
    }

    /// Solved share in percent, `None` before any round was played
    pub fn solved_percent(&self) -> Option<f64> {
        (self.played > 0).then(|| self.solved as f64 * 100.0 / self.played as f64)
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, " Rounds played  : {}", self.played)?;
        match self.solved_percent() {
            Some(pct) => writeln!(f, " Solved         : {}  ({:.0}%)", self.solved, pct)?,
            None => writeln!(f, " Solved         : 0")?,
        }
        writeln!(f, " Skipped        : {}", self.skipped)?;
        writeln!(f, " Revealed (help): {}", self.revealed)?;
        writeln!(f, " Fastest time   : {}", format_duration(self.fastest))?;
        write!(f, " Average time   : {}", format_duration(self.average))
    }
}

/// `12.3s` under a minute, `2m05.0s` above
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{}m{:04.1}s", minutes as u64, secs - 60.0 * minutes)
    }
}
