#![deny(clippy::all)]

use napi::{Env, JsUnknown, ValueType};
use napi_derive::napi;

use format_preserver::{
    Content, FormatPreserver as RustFormatPreserver, PreserveError, PreserveOptions,
    StyleAttribute,
};

#[napi(object)]
pub struct Options {
    pub attributes: Option<Vec<String>>,
    pub amp_placeholder: Option<String>,
}

impl TryFrom<Options> for PreserveOptions {
    type Error = PreserveError;

    fn try_from(opts: Options) -> Result<Self, Self::Error> {
        let mut result = PreserveOptions::default();

        if let Some(attributes) = opts.attributes {
            result.attributes = attributes
                .iter()
                .map(|name| name.parse::<StyleAttribute>())
                .collect::<Result<_, _>>()?;
        }

        if let Some(placeholder) = opts.amp_placeholder {
            result.amp_placeholder = placeholder;
        }

        Ok(result)
    }
}

fn to_napi_error(e: PreserveError) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Strings become `Content::Markup`, every other JS value is passed through.
fn to_content(input: JsUnknown) -> napi::Result<Content<JsUnknown>> {
    if input.get_type()? != ValueType::String {
        return Ok(Content::Other(input));
    }
    let html = input.coerce_to_string()?.into_utf8()?.into_owned()?;
    Ok(Content::Markup(html))
}

fn sanitize_with(
    preserver: &RustFormatPreserver,
    env: Env,
    input: JsUnknown,
) -> napi::Result<JsUnknown> {
    match preserver.sanitize_content(to_content(input)?) {
        Content::Markup(text) => Ok(env.create_string(&text)?.into_unknown()),
        Content::Other(value) => Ok(value),
    }
}

#[napi]
pub struct FormatPreserver {
    inner: RustFormatPreserver,
}

#[napi]
impl FormatPreserver {
    #[napi(constructor)]
    pub fn new(options: Option<Options>) -> napi::Result<Self> {
        let inner = match options {
            Some(opts) => {
                let options = PreserveOptions::try_from(opts).map_err(to_napi_error)?;
                RustFormatPreserver::with_options(options).map_err(to_napi_error)?
            }
            None => RustFormatPreserver::new(),
        };
        Ok(Self { inner })
    }

    /// Flatten HTML to text with bold/underline/italic spans. Non-strings are returned as-is.
    #[napi]
    pub fn sanitize(&self, env: Env, input: JsUnknown) -> napi::Result<JsUnknown> {
        sanitize_with(&self.inner, env, input)
    }

    /// Replace sentinel markers with style spans
    #[napi]
    pub fn replace_markers(&self, text: String) -> String {
        self.inner.replace_markers(&text)
    }
}

/// Sanitize with default options
#[napi(js_name = "sanitize")]
pub fn sanitize_default(env: Env, input: JsUnknown) -> napi::Result<JsUnknown> {
    sanitize_with(&RustFormatPreserver::new(), env, input)
}
