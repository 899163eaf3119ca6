use crate::{
    base85::{self, Alphabet, Decoder, Encoder},
    hex, Arc, Error, Logger, Server,
};
use hyper::{Body, Response, StatusCode};
use serde_json::json;

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(Error::from(error)),
        }
    }};
}

/// What the HTTP handlers share: one alphabet and the codec built on it.
pub struct Codec {
    alphabet: &'static Alphabet<85>,
    encoder: Encoder<'static>,
    decoder: Decoder<'static>,
}

impl Codec {
    pub const fn new(alphabet: &'static Alphabet<85>) -> Self {
        Self {
            alphabet,
            encoder: Encoder::new(alphabet),
            decoder: Decoder::new(alphabet),
        }
    }

    fn encode(&self, bytes: &[u8]) -> Response<Body> {
        let encoded = unwrap!(self.encoder.encode(bytes));
        respond_ok(json!({ "encoded": encoded }))
    }

    fn decode(&self, text: &[u8]) -> Response<Body> {
        let bytes = unwrap!(self.decoder.decode(text));
        respond_ok(json!({ "hex": hex::encode(&bytes), "length": bytes.len() }))
    }
}

fn respond(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(hyper::header::CONTENT_TYPE, hyper::header::HeaderValue::from_static("application/json"));
    response
}

fn respond_ok(value: serde_json::Value) -> Response<Body> {
    respond(StatusCode::OK, value)
}

fn respond_error(error: Error) -> Response<Body> {
    respond(StatusCode::BAD_REQUEST, json!({ "message": error.message() }))
}

pub fn create_server(logger: Logger) -> Server<Codec> {
    let mut server = Server::new(Arc::new(Codec::new(&base85::ALPHABET)), logger);

    server.get("/alphabet", |_parameters, _body, codec| async move {
        respond_ok(json!({
            "alphabet": codec.alphabet.as_str(),
            "pad": char::from(codec.alphabet.last()).to_string(),
        }))
    });

    server.get("/encode/{hex}", |parameters, _body, codec| async move {
        let digits = parameters.get("hex").map(String::as_str).unwrap_or_default();
        let bytes = unwrap!(hex::decode(digits));
        codec.encode(&bytes)
    });

    server.post("/encode", |_parameters, body, codec| async move { codec.encode(&body) });

    server.post("/decode", |_parameters, body, codec| async move { codec.decode(&body) });

    server
}
