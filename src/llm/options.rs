/// Per-call generation settings. `None` leaves the provider default in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub temperature: Option<f32>,
    /// `None` lets the model produce as many tokens as it allows.
    pub max_tokens: Option<u32>,
    pub stop_words: Option<Vec<String>>,
    pub top_p: Option<f32>,
    pub seed: Option<i64>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stop_words<S: Into<String>>(
        mut self,
        stop_words: impl IntoIterator<Item = S>,
    ) -> Self {
        self.stop_words = Some(stop_words.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overwrites the fields that are set in `incoming_options`.
    pub fn merge_options(&mut self, incoming_options: CallOptions) {
        self.temperature = incoming_options.temperature.or(self.temperature);
        self.max_tokens = incoming_options.max_tokens.or(self.max_tokens);
        self.stop_words = incoming_options.stop_words.or(self.stop_words.take());
        self.top_p = incoming_options.top_p.or(self.top_p);
        self.seed = incoming_options.seed.or(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut options = CallOptions::new().with_temperature(0.0).with_seed(7);
        options.merge_options(CallOptions::new().with_stop_words(["\nSQLResult:"]));

        assert_eq!(options.temperature, Some(0.0));
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.stop_words, Some(vec!["\nSQLResult:".to_string()]));
        assert_eq!(options.max_tokens, None);
    }

    #[test]
    fn test_merge_overwrites_set_fields() {
        let mut options = CallOptions::new().with_temperature(0.7).with_max_tokens(10);
        options.merge_options(CallOptions::new().with_temperature(0.0));

        assert_eq!(options.temperature, Some(0.0));
        assert_eq!(options.max_tokens, Some(10));
    }
}
