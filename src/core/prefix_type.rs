/*-------------------------------------------------------------------------------------------------
  Prefix Type
-------------------------------------------------------------------------------------------------*/

/// IP prefix type (IPv4 or IPv6) used to categorize a service's address prefixes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrefixType {
    IPv4,
    IPv6,
}

impl PrefixType {
    /// Categorize a CIDR-notation prefix by its separators. Anything containing a `:` is IPv6;
    /// anything containing a `.` and no `:` is IPv4. Everything else is uncategorized.
    ///
    /// The prefix is not otherwise validated.
    ///
    /// ```
    /// use azureipranges::PrefixType;
    ///
    /// assert_eq!(PrefixType::classify("10.0.0.0/8"), Some(PrefixType::IPv4));
    /// assert_eq!(PrefixType::classify("2603:1000::/24"), Some(PrefixType::IPv6));
    /// assert_eq!(PrefixType::classify("not-an-ip"), None);
    /// ```
    pub fn classify(prefix: &str) -> Option<PrefixType> {
        if prefix.contains(':') {
            Some(PrefixType::IPv6)
        } else if prefix.contains('.') {
            Some(PrefixType::IPv4)
        } else {
            None
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
