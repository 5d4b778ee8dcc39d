/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

use std::fs::{self,File};
use std::io::{self,BufWriter,Write,ErrorKind};
use std::path::{Path,PathBuf};
use regex::Regex;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn filename_of_path (path: impl AsRef<Path>)->Result<String> {
    let path = path.as_ref();
    Ok( filename(&path)
        .ok_or( io_error!(ErrorKind::InvalidInput, "not a valid filename {path:?}"))?
        .to_string())
}

pub fn filestem_of_path (path: impl AsRef<Path>)->Result<String> {
    let path = path.as_ref();
    Ok( filestem(&path)
        .ok_or( io_error!(ErrorKind::InvalidInput, "not a valid filename {path:?}"))?
        .to_string())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().as_ref().to_string()
}

/// regular files in `dir` whose name matches `fname_regex`, sorted by path
pub fn matching_files_in_dir<P: AsRef<Path>> (dir: &P, fname_regex: &Regex) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            if let Some(fname) = entry.file_name().to_str() {
                if fname_regex.is_match( fname) {
                    list.push(entry.path())
                }
            }
        }
    }

    list.sort();
    Ok(list)
}

/// regular files in `dir` whose name ends with `.<ext>` (case sensitive), sorted by path.
/// Note this is a name suffix match, i.e. a hidden file named `.<ext>` is included, and it is not recursive
pub fn files_with_extension<P: AsRef<Path>> (dir: &P, ext: &str) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() {
        return Err( io_error!(ErrorKind::NotFound, "not a directory: {:?}", dir))
    }

    let re = Regex::new( &format!(r"\.{}$", regex::escape(ext)))
        .map_err( |e| io_error!(ErrorKind::InvalidInput, "invalid extension {ext}: {e}"))?;
    matching_files_in_dir( &dir, &re)
}

/// write each item on its own line, truncating an existing file
pub fn write_lines<P,I,S> (path: P, lines: I) -> Result<()>
    where P: AsRef<Path>, I: IntoIterator<Item=S>, S: AsRef<str>
{
    let mut w = BufWriter::new( File::create(path.as_ref())?);
    for line in lines {
        writeln!( w, "{}", line.as_ref())?;
    }
    w.flush()
}
