/// An identity that could not be resolved, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedIdentity {
    pub identity: String,
    pub reason: String,
}

/// Stats from an attribution or correction run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub identities_seen: u32,
    pub identities_processed: u32,
    pub reference_participants: u32,
    pub contributions: u64,
    /// Repeated identities dropped from the input.
    pub duplicates: u32,
    pub skipped: Vec<SkippedIdentity>,
}

impl RunStats {
    pub(crate) fn skip(&mut self, identity: &str, reason: String) {
        self.skipped.push(SkippedIdentity {
            identity: identity.to_string(),
            reason,
        });
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Run Complete ===")?;
        writeln!(f, "Identities seen:      {}", self.identities_seen)?;
        writeln!(f, "Identities processed: {}", self.identities_processed)?;
        writeln!(f, "Reference members:    {}", self.reference_participants)?;
        writeln!(f, "Contributions:        {}", self.contributions)?;
        if self.duplicates > 0 {
            writeln!(f, "Duplicates dropped:   {}", self.duplicates)?;
        }
        writeln!(f, "Skipped:              {}", self.skipped.len())?;
        for s in &self.skipped {
            writeln!(f, "  {}: {}", s.identity, s.reason)?;
        }
        Ok(())
    }
}
