use quote::ToTokens;

/// Errors gathered while parsing a record, so one expansion reports every
/// bad field and annotation at once.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    /// Record an error pointing at `tokens`.
    pub(crate) fn spanned(&mut self, tokens: impl ToTokens, message: &str) {
        self.errors.push(syn::Error::new_spanned(tokens, message));
    }

    /// Keep the parsed value, or record the error and yield nothing.
    pub(crate) fn take<T>(&mut self, result: syn::Result<T>) -> Option<T> {
        result.map_err(|err| self.errors.push(err)).ok()
    }

    /// `value` when nothing was recorded, otherwise every error combined.
    pub(crate) fn finish<T>(self, value: T) -> syn::Result<T> {
        match self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        }) {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}
