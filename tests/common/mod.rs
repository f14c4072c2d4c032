#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use licenseid::{Corpus, Detector};

/// Canonical MIT license text, as shipped in a project's LICENSE file.
pub const MIT_TEXT: &str = "\
MIT License

Copyright (c) 2021 Example Corp.

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

/// Canonical BSD-3-Clause license text.
pub const BSD3_TEXT: &str = "\
Copyright (c) 2019 The Contributors

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its contributors
   may be used to endorse or promote products derived from this software
   without specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS \"AS IS\"
AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
";

/// A copyleft-style reference whose raw text carries an optional tail after
/// the terms marker, the shape the corpus loader splits into two variants.
pub const COPYLEFT_TEXT: &str = "\
Everyone is permitted to copy and distribute verbatim copies of this
license document, but changing it is not allowed. This version of the
program is licensed under the terms stated below, and each recipient of
the program receives an identical grant.

You may convey covered works to others provided that you also convey the
complete corresponding machine readable source under the same terms. You
must keep intact all notices stating that these terms apply to the work,
and give all recipients a copy of these terms along with the program.

Conveying under any other circumstances is permitted solely under the
conditions stated below. Sublicensing is not allowed, and any attempt
otherwise to propagate or modify a covered work is void, terminating your
rights under these terms automatically.

Each time you convey a covered work, the recipient automatically receives
a license from the original licensors to run, propagate and modify that
work, subject to compliance with these terms. You are not responsible for
enforcing compliance by third parties with these terms.

END OF TERMS AND CONDITIONS

How to apply these terms to your new programs: attach the following
notices to the program, one notice per source file, stating where the
full notice is found, and make sure that the program prints a short
statement about warranty coverage when started in interactive mode.
";

/// A paragraph of unrelated prose that should never detect as a license.
pub const LOREM_TEXT: &str = "\
Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim
veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea
commodo consequat. Duis aute irure dolor in reprehenderit in voluptate
velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint
occaecat cupidatat non proident, sunt in culpa qui officia deserunt
mollit anim id est laborum.
";

/// Writes the standard reference corpus into `dir`.
pub fn write_standard_corpus(dir: &Path) -> Result<()> {
  fs::write(dir.join("MIT.txt"), MIT_TEXT)?;
  fs::write(dir.join("BSD-3-Clause.txt"), BSD3_TEXT)?;
  fs::write(dir.join("AGPL-3.0.txt"), COPYLEFT_TEXT)?;
  Ok(())
}

/// Loads a detector over the standard corpus written into `dir`.
pub fn standard_detector(dir: &Path) -> Result<Detector> {
  write_standard_corpus(dir)?;
  let corpus = Corpus::load([dir])?;
  Ok(Detector::new(corpus)?)
}
