// MIT License
//
// Copyright (c) 2019 Gregory Meyer
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Fills a small table past its initial capacity and prints the resulting
//! bucket layout. Run with `RUST_LOG=debug` to see the miss diagnostics.

use chainmap::HashTable;

use log::info;

fn main() {
    env_logger::init();

    let mut table = HashTable::with_capacity(8).expect("nonzero capacity");

    for i in 0..10 {
        table.insert(&format!("key-{}", i), format!("val-{}", i));
    }

    info!(
        "stored {} pairs across {} buckets",
        table.len(),
        table.capacity()
    );

    table.remove("key-0");
    // the second attempt misses and logs a warning
    table.remove("key-0");

    println!("{}", table);

    for key in ["key-0", "key-5"] {
        match table.retrieve(key) {
            Some(value) => println!("{} => {}", key, value),
            None => println!("{} is not present", key),
        }
    }
}
