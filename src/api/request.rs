use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// Multipart payload; the transport picks the boundary and content type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type,
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FormPayload),
}

/// Immutable description of one outgoing call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    body: RequestBody,
    requires_auth: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: &str, body: RequestBody, requires_auth: bool) -> Self {
        Self {
            method,
            path: normalize_path(path),
            body,
            requires_auth,
        }
    }

    pub fn get(path: &str, requires_auth: bool) -> Self {
        Self::new(Method::Get, path, RequestBody::Empty, requires_auth)
    }

    pub fn post(path: &str, body: Value, requires_auth: bool) -> Self {
        Self::new(Method::Post, path, RequestBody::Json(body), requires_auth)
    }

    pub fn put(path: &str, body: Value, requires_auth: bool) -> Self {
        Self::new(Method::Put, path, RequestBody::Json(body), requires_auth)
    }

    pub fn delete(path: &str, requires_auth: bool) -> Self {
        Self::new(Method::Delete, path, RequestBody::Empty, requires_auth)
    }

    pub fn multipart(path: &str, form: FormPayload, requires_auth: bool) -> Self {
        Self::new(Method::Post, path, RequestBody::Multipart(form), requires_auth)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub(crate) fn into_body(self) -> RequestBody {
        self.body
    }
}

/// Ensures the path starts with exactly the `/` the caller gave or one we add.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
