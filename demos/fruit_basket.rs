use sovran_set::{impl_member, set, Set};
use std::thread;

#[derive(Debug, Clone, Hash)]
struct Order {
    customer: String,
    item: String,
    quantity: u32,
}

impl_member!(Order);

fn main() {
    let basket = set!["apple", "orange", "lemon", "banana"];
    println!("Basket starts with {} fruits: {:?}", basket.len(), basket);

    let added = basket.add(["apple", "kiwi"]);
    println!("Added {} new fruit(s), basket now holds {}", added, basket.len());

    let removed = basket.remove(["orange", "grapefruit"]);
    println!("Removed {} fruit(s)", removed);

    // Mixed kinds share a set without colliding
    let labels = set!["7", 7, 7.0, 7.0f32];
    println!(
        "Labels: {} strings, {} ints, {} f32, {} f64",
        labels.strings().len(),
        labels.ints().len(),
        labels.floats32().len(),
        labels.floats64().len()
    );

    // Several threads record orders; duplicates collapse
    let orders = Set::new();
    let handles: Vec<_> = ["alice", "bob", "alice"]
        .into_iter()
        .map(|customer| {
            let orders = orders.clone();
            thread::spawn(move || {
                orders.add([Order {
                    customer: customer.to_string(),
                    item: "apple".to_string(),
                    quantity: 2,
                }])
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.join() {
            eprintln!("Order thread panicked: {:?}", e);
        }
    }
    println!("Distinct orders recorded: {}", orders.len());

    for entry in orders.entries() {
        if let Some(order) = entry.downcast_ref::<Order>() {
            println!(
                "  {} ordered {} x {} ({})",
                order.customer,
                order.quantity,
                order.item,
                entry.key()
            );
        }
    }

    basket.join(&set!["plum", "kiwi"]);
    println!("After joining: {:?}", basket);
}
