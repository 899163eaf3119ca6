use crate::Logger;
use hyper::{
    body::HttpBody,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use std::{collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// A request path template such as `/encode/{hex}`; each `{name}` matches one path segment.
pub struct PathTemplate {
    regex: Regex,
    names: Vec<String>,
}

impl PathTemplate {
    pub fn new(template: &str) -> Self {
        let placeholder = Regex::new(r"\{([^{}/]*)\}").expect("placeholder pattern compiles");
        let mut pattern = String::from("^");
        let mut names = Vec::new();
        let mut offset = 0;
        for captures in placeholder.captures_iter(template) {
            let range = captures.get(0).map_or(offset..offset, |found| found.range());
            let name = captures[1].to_string();
            assert!(!names.contains(&name), "duplicate parameter {} in {}", name, template);
            pattern.push_str(&regex::escape(&template[offset..range.start]));
            pattern.push_str("([^/]*)");
            names.push(name);
            offset = range.end;
        }
        pattern.push_str(&regex::escape(&template[offset..]));
        pattern.push('$');
        let regex = Regex::new(&pattern).expect("escaped template compiles");
        Self { regex, names }
    }

    pub fn parameters(&self, path: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.names
                .iter()
                .enumerate()
                .map(|(index, name)| (name.clone(), captures[index + 1].to_string()))
                .collect(),
        )
    }
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    template: PathTemplate,
    handler: BoxedHandler<S>,
}

impl<S> Route<S> {
    fn parameters(&self, request: &Request<Body>) -> Option<HashMap<String, String>> {
        if request.method() == self.method {
            self.template.parameters(request.uri().path())
        } else {
            None
        }
    }
}

fn not_found() -> Response<Body> {
    let mut response = Response::new(Body::from("Not Found"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

pub struct Router<S> {
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            routes: Vec::new(),
            state,
            logger,
        }
    }

    pub fn add<H, F>(&mut self, method: Method, template: &str, handler: H)
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route {
            method,
            template: PathTemplate::new(template),
            handler: Box::new(move |parameters, body, state| Box::pin(handler(parameters, body, state))),
        });
    }

    pub async fn route(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        let matched = self
            .routes
            .iter()
            .find_map(|route| route.parameters(&request).map(|parameters| (route, parameters)));
        let response = match matched {
            Some((route, parameters)) => (route.handler)(parameters, body, self.state.clone()).await,
            None => not_found(),
        };
        self.logger.log(format!("{} {} {}", request.method(), request.uri(), response.status().as_u16()));
        response
    }
}

pub struct Server<S> {
    router: Router<S>,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            router: Router::new(state, logger),
        }
    }

    pub fn get<H, F>(&mut self, template: &str, handler: H)
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::GET, template, handler);
    }

    pub fn post<H, F>(&mut self, template: &str, handler: H)
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::POST, template, handler);
    }

    pub async fn handle(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.router.route(request, body).await
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), hyper::Error> {
        let router = Arc::new(self.router);
        let make_service = make_service_fn(|_| {
            let router = router.clone();
            async {
                Ok::<_, Infallible>(service_fn(move |mut request: Request<Body>| {
                    let router = router.clone();
                    async move {
                        let mut body: Vec<u8> = Vec::new();
                        while let Some(chunk) = request.body_mut().data().await {
                            body.extend_from_slice(&chunk?);
                        }
                        Ok::<_, hyper::Error>(router.route(request, body).await)
                    }
                }))
            }
        });
        hyper::Server::try_bind(&address)?.serve(make_service).await
    }
}
