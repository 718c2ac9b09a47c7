//! Request fixtures shared by the router benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    request: TestRequest,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, request: TestRequest) -> Self {
        Self { name, group, request }
    }

    /// A request matched near the top of the route tree.
    pub fn shallow(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Shallow, request)
    }

    /// A request that walks through several nested alternatives.
    pub fn nested(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Nested, request)
    }

    /// A request carrying a body to decode.
    pub fn with_body(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Body, request)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn request(&self) -> &TestRequest {
        &self.request
    }

    pub fn uri(&self) -> &'static str {
        self.request().uri
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestRequest {
    method: &'static str,
    uri: &'static str,
    body: Option<(&'static str, &'static str)>,
}

impl TestRequest {
    pub const fn new(method: &'static str, uri: &'static str) -> Self {
        Self { method, uri, body: None }
    }

    pub const fn with_body(method: &'static str, uri: &'static str, content_type: &'static str, body: &'static str) -> Self {
        Self { method, uri, body: Some((content_type, body)) }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn uri(&self) -> &'static str {
        self.uri
    }

    /// Content type and body, when the request has one.
    pub fn body(&self) -> Option<(&'static str, &'static str)> {
        self.body
    }

    /// Length of the uri plus the body, used as benchmark throughput.
    pub fn len(&self) -> usize {
        self.uri.len() + self.body.map_or(0, |(_, body)| body.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Shallow,
    Nested,
    Body,
}
