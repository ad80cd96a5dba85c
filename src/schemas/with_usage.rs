use super::TokenUsage;

#[derive(Debug)]
pub struct WithUsage<O> {
    pub content: O,
    pub usage: Option<TokenUsage>,
}

impl<O> WithUsage<O> {
    pub fn map<T>(self, f: impl FnOnce(O) -> T) -> WithUsage<T> {
        WithUsage {
            content: f(self.content),
            usage: self.usage,
        }
    }
}

pub trait IntoWithUsage<T> {
    fn with_usage(self, usage: Option<TokenUsage>) -> WithUsage<T>;
}

impl<T> IntoWithUsage<T> for T {
    fn with_usage(self, usage: Option<TokenUsage>) -> WithUsage<T> {
        WithUsage {
            content: self,
            usage,
        }
    }
}
