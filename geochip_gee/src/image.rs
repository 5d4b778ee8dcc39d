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

//! typed builders for the Earth Engine algorithms we use. Images keep track of their band names
//! where these are known from the builder calls

use serde_json::Value;
use geochip_common::BoundingBox;
use crate::expr::Expr;

#[derive(Debug,Clone,PartialEq)]
pub struct Geometry(Expr);

impl Geometry {
    /// lon/lat bounding box
    pub fn bbox (bbox: &BoundingBox<f64>) -> Self {
        Geometry( Expr::invoke( "GeometryConstructors.BBox", [
            ("west", Expr::constant( bbox.west)),
            ("south", Expr::constant( bbox.south)),
            ("east", Expr::constant( bbox.east)),
            ("north", Expr::constant( bbox.north)),
        ]))
    }

    pub fn expr (&self) -> &Expr { &self.0 }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Filter(Expr);

impl Filter {
    /// property `name` equals `value`
    pub fn eq (name: &str, value: impl Into<Value>) -> Self {
        Filter( Expr::invoke( "Filter.equals", [
            ("leftField", Expr::string( name)),
            ("rightValue", Expr::constant( value)),
        ]))
    }

    /// footprint intersects geometry
    pub fn bounds (geometry: &Geometry) -> Self {
        Filter( Expr::invoke( "Filter.intersects", [
            ("leftField", Expr::string(".all")),
            ("rightValue", geometry.0.clone()),
        ]))
    }

    /// acquisition time within `[start,end)` ("yyyy-MM-dd" dates)
    pub fn date (start: &str, end: &str) -> Self {
        let range = Expr::invoke( "DateRange", [
            ("start", date(start)),
            ("end", date(end)),
        ]);
        Filter( Expr::invoke( "Filter.dateRangeContains", [
            ("leftValue", range),
            ("rightField", Expr::string("system:time_start")),
        ]))
    }

    pub fn expr (&self) -> &Expr { &self.0 }
}

fn date (s: &str) -> Expr {
    Expr::invoke( "Date", [("value", Expr::string(s))])
}

#[derive(Debug,Clone,PartialEq)]
pub struct ImageCollection(Expr);

impl ImageCollection {
    pub fn load (id: &str) -> Self {
        ImageCollection( Expr::invoke( "ImageCollection.load", [("id", Expr::string(id))]))
    }

    pub fn filter (&self, filter: &Filter) -> Self {
        ImageCollection( Expr::invoke( "Collection.filter", [
            ("collection", self.0.clone()),
            ("filter", filter.0.clone()),
        ]))
    }

    pub fn filter_bounds (&self, geometry: &Geometry) -> Self {
        self.filter( &Filter::bounds( geometry))
    }

    pub fn filter_date (&self, start: &str, end: &str) -> Self {
        self.filter( &Filter::date( start, end))
    }

    /// per pixel median. Band names are those of the collection images, which we don't know
    pub fn median (&self) -> Image {
        Image {
            expr: Expr::invoke( "reduce.median", [("collection", self.0.clone())]),
            bands: None
        }
    }

    pub fn expr (&self) -> &Expr { &self.0 }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    expr: Expr,
    bands: Option<Vec<String>>,
}

impl Image {
    /// select bands, optionally renaming them
    pub fn select<S: AsRef<str>> (&self, selectors: &[S], new_names: Option<&[S]>) -> Self {
        let mut args = vec![
            ("input", self.expr.clone()),
            ("bandSelectors", Expr::string_array( selectors)),
        ];
        if let Some(names) = new_names {
            args.push( ("newNames", Expr::string_array( names)));
        }

        let bands = new_names.unwrap_or( selectors).iter().map( |s| s.as_ref().to_string()).collect();
        Image { expr: Expr::invoke( "Image.select", args), bands: Some(bands) }
    }

    /// pixel wise difference, the result has the band names of `self`
    pub fn subtract (&self, other: &Image) -> Self {
        Image {
            expr: Expr::invoke( "Image.subtract", [
                ("image1", self.expr.clone()),
                ("image2", other.expr.clone()),
            ]),
            bands: self.bands.clone()
        }
    }

    pub fn rename<S: AsRef<str>> (&self, names: &[S]) -> Self {
        Image {
            expr: Expr::invoke( "Image.rename", [
                ("input", self.expr.clone()),
                ("names", Expr::string_array( names)),
            ]),
            bands: Some( names.iter().map( |s| s.as_ref().to_string()).collect())
        }
    }

    /// bands of `src` appended to the bands of `self`
    pub fn add_bands (&self, src: &Image) -> Self {
        let bands = match (&self.bands, &src.bands) {
            (Some(dst), Some(src)) => Some( dst.iter().chain( src.iter()).cloned().collect()),
            _ => None
        };
        Image {
            expr: Expr::invoke( "Image.addBands", [
                ("dstImg", self.expr.clone()),
                ("srcImg", src.expr.clone()),
            ]),
            bands
        }
    }

    pub fn to_float (&self) -> Self {
        Image {
            expr: Expr::invoke( "Image.toFloat", [("value", self.expr.clone())]),
            bands: self.bands.clone()
        }
    }

    pub fn clip_to_bounds_and_scale (&self, geometry: &Geometry, scale: f64) -> Self {
        Image {
            expr: Expr::invoke( "Image.clipToBoundsAndScale", [
                ("input", self.expr.clone()),
                ("geometry", geometry.0.clone()),
                ("scale", Expr::constant( scale)),
            ]),
            bands: self.bands.clone()
        }
    }

    pub fn bands (&self) -> Option<&[String]> {
        self.bands.as_deref()
    }

    pub fn expr (&self) -> &Expr { &self.expr }
}
