/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! Earth Engine expression graphs.
//!
//! An [`Expr`] is a tree of algorithm invocations and constant values. It is sent to the
//! Earth Engine REST API as an [`Expression`], a flat `{"result": id, "values": {id: node}}` map
//! in which every function invocation is stored once and referenced by id. Identical sub-trees
//! (such as a filtered collection that is used for several composites) therefore appear only once.

use std::collections::{BTreeMap,HashMap};
use serde::{Serialize,Deserialize};
use serde_json::{json, Value};

#[derive(Debug,Clone,PartialEq)]
pub enum Expr {
    Constant(Value),
    Array(Vec<Expr>),
    Dictionary(BTreeMap<String,Expr>),
    Invocation { function: String, args: BTreeMap<String,Expr> },
    ArgumentReference(String),
}

impl Expr {
    pub fn constant (v: impl Into<Value>) -> Self {
        Expr::Constant( v.into())
    }

    pub fn string (s: &str) -> Self {
        Expr::Constant( Value::String( s.to_string()))
    }

    pub fn string_array<S: AsRef<str>> (items: &[S]) -> Self {
        Expr::Array( items.iter().map( |s| Expr::string( s.as_ref())).collect())
    }

    /// invocation of a named platform algorithm with (name,argument) pairs
    pub fn invoke<I> (function: &str, args: I) -> Self where I: IntoIterator<Item=(&'static str,Expr)> {
        Expr::Invocation {
            function: function.to_string(),
            args: args.into_iter().map( |(k,v)| (k.to_string(), v)).collect()
        }
    }

    pub fn function_name (&self) -> Option<&str> {
        match self {
            Expr::Invocation { function, .. } => Some( function.as_str()),
            _ => None
        }
    }

    pub fn arg (&self, name: &str) -> Option<&Expr> {
        match self {
            Expr::Invocation { args, .. } => args.get( name),
            _ => None
        }
    }
}

/// the serialized form of an expression graph
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String,Value>,
}

impl Expression {
    pub fn encode (root: &Expr) -> Self {
        let mut enc = Encoder::default();
        let result = match enc.encode_node( root) {
            Encoded::Reference(id) => id,
            Encoded::Inline(node) => enc.intern( node),
        };
        Expression { result, values: enc.values }
    }

    pub fn len (&self) -> usize { self.values.len() }

    pub fn is_empty (&self) -> bool { self.values.is_empty() }

    /// the node the result id refers to
    pub fn result_node (&self) -> Option<&Value> {
        self.values.get( &self.result)
    }
}

enum Encoded {
    Reference(String),
    Inline(Value),
}

impl Encoded {
    fn into_value (self) -> Value {
        match self {
            Encoded::Reference(id) => json!({ "valueReference": id }),
            Encoded::Inline(v) => v
        }
    }
}

#[derive(Default)]
struct Encoder {
    values: BTreeMap<String,Value>,
    ids: HashMap<String,String>, // canonical node JSON -> id
}

impl Encoder {
    fn encode_node (&mut self, e: &Expr) -> Encoded {
        match e {
            Expr::Constant(v) => Encoded::Inline( json!({ "constantValue": v })),

            Expr::Array(items) => {
                let values: Vec<Value> = items.iter().map( |i| self.encode_node(i).into_value()).collect();
                Encoded::Inline( json!({ "arrayValue": { "values": values } }))
            }

            Expr::Dictionary(map) => {
                let values: serde_json::Map<String,Value> = map.iter().map( |(k,v)| (k.clone(), self.encode_node(v).into_value())).collect();
                Encoded::Inline( json!({ "dictionaryValue": { "values": values } }))
            }

            Expr::ArgumentReference(name) => Encoded::Inline( json!({ "argumentReference": name })),

            Expr::Invocation { function, args } => {
                let arguments: serde_json::Map<String,Value> = args.iter().map( |(k,v)| (k.clone(), self.encode_node(v).into_value())).collect();
                let node = json!({ "functionInvocationValue": { "functionName": function, "arguments": arguments } });
                Encoded::Reference( self.intern( node))
            }
        }
    }

    // ids are assigned in post-order, i.e. arguments always have lower ids than their invocation
    fn intern (&mut self, node: Value) -> String {
        let key = node.to_string();
        if let Some(id) = self.ids.get( &key) {
            return id.clone()
        }
        let id = self.values.len().to_string();
        self.values.insert( id.clone(), node);
        self.ids.insert( key, id.clone());
        id
    }
}
