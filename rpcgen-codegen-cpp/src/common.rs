//! Client code shared by the raw and pwpb backends.
//!
//! Both backends generate the same call structure and differ only in the
//! types they name, so each describes a call with [`ClientCall`] and the
//! rendering lives here.

use rpcgen_codegen::{CodeBuilder, MethodContext};
use rpcgen_core::format_id;
use rpcgen_ir::MethodType;

/// A `::pw::Function` callback parameter.
#[derive(Debug, Clone)]
pub(crate) struct Callback {
    pub name: &'static str,
    pub signature: String,
}

impl Callback {
    fn param(&self) -> String {
        format!("::pw::Function<{}>&& {} = nullptr", self.signature, self.name)
    }

    fn forward(&self) -> String {
        format!("std::move({})", self.name)
    }
}

/// Everything needed to emit the client functions of one method.
#[derive(Debug, Clone)]
pub(crate) struct ClientCall {
    /// The call object type returned to the caller.
    pub call_type: String,
    /// Static function starting the call, e.g. `...ClientCall::Start<T>`.
    pub start: String,
    /// Declaration of the request parameter, for methods sending one request.
    pub request: Option<String>,
    pub callbacks: Vec<Callback>,
}

impl ClientCall {
    /// Build the call description for `kind`.
    ///
    /// `response` is how a callback receives a response, `request` how the
    /// caller passes the request.
    pub fn new(
        kind: MethodType,
        call_type: String,
        start: String,
        request: &str,
        response: &str,
    ) -> Self {
        let on_next = || Callback {
            name: "on_next",
            signature: format!("void({response})"),
        };
        let on_completed = |signature: String| Callback {
            name: "on_completed",
            signature,
        };
        let on_error = Callback {
            name: "on_error",
            signature: "void(::pw::Status)".to_string(),
        };

        let callbacks = if kind.server_streaming() {
            vec![
                on_next(),
                on_completed("void(::pw::Status)".to_string()),
                on_error,
            ]
        } else {
            vec![
                on_completed(format!("void({response}, ::pw::Status)")),
                on_error,
            ]
        };

        Self {
            call_type,
            start,
            request: (!kind.client_streaming()).then(|| format!("{request} request")),
            callbacks,
        }
    }

    fn params(&self) -> impl Iterator<Item = String> + '_ {
        self.request
            .iter()
            .cloned()
            .chain(self.callbacks.iter().map(Callback::param))
    }

    fn forwarded(&self) -> Vec<String> {
        self.request
            .iter()
            .map(|_| "request".to_string())
            .chain(self.callbacks.iter().map(Callback::forward))
            .collect()
    }
}

/// Write the `Client` member function starting the call.
pub(crate) fn client_member_function(
    out: &mut CodeBuilder,
    method: MethodContext<'_>,
    call: &ClientCall,
) {
    out.push_line(&format!("{} {}(", call.call_type, method.name()));
    write_params(out, call.params(), ") const {");

    let mut args = vec![
        "client()".to_string(),
        "channel_id()".to_string(),
        "kServiceId".to_string(),
        format_id(method.id),
    ];
    if call.request.is_none() {
        args.push("{}".to_string());
    }
    args.extend(call.forwarded());

    out.indented(|out| {
        out.push_line(&format!("return {}(", call.start));
        out.push_line(&format!("    {});", args.join(", ")));
    });
    out.push_line("}");
}

/// Write the static helper that calls the member function on a temporary
/// `Client`.
pub(crate) fn client_static_function(
    out: &mut CodeBuilder,
    method: MethodContext<'_>,
    call: &ClientCall,
) {
    out.push_line(&format!("static {} {}(", call.call_type, method.name()));
    let params = ["::pw::rpc::Client& client".to_string(), "uint32_t channel_id".to_string()]
        .into_iter()
        .chain(call.params());
    write_params(out, params, ") {");

    out.indented(|out| {
        out.push_line(&format!(
            "return Client(client, channel_id).{}({});",
            method.name(),
            call.forwarded().join(", ")
        ));
    });
    out.push_line("}");
}

/// One parameter per line at a 4-space continuation indent, the last one
/// followed by `close`.
fn write_params(out: &mut CodeBuilder, params: impl Iterator<Item = String>, close: &str) {
    let params: Vec<_> = params.collect();
    let last = params.len().saturating_sub(1);
    for (i, param) in params.iter().enumerate() {
        let end = if i == last { close } else { "," };
        out.push_line(&format!("    {param}{end}"));
    }
}

/// A method descriptor entry: the getter call followed by the method ID.
pub(crate) fn method_descriptor(out: &mut CodeBuilder, getter: &str, method: MethodContext<'_>) {
    out.push_line(&format!("{getter}("));
    out.push_line(&format!(
        "    {}),  // Hash of \"{}\"",
        format_id(method.id),
        method.name()
    ));
}
