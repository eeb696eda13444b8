use wire_bitmap::{Bitmap, max_size_needed_to_store_in_buffer};

const MAX_REPLICAS: u32 = 16;

fn main() {
    let replicas = 7;
    let mut acks = Bitmap::new(replicas);
    for replica in [0, 2, 3, 6] {
        acks.set(replica);
    }
    println!("acks: {acks:?}");

    // sized for the largest cluster we support, not this one
    let mut message = vec![0u8; max_size_needed_to_store_in_buffer(MAX_REPLICAS)];
    let written = match acks.write_to_buffer(&mut message) {
        Ok(written) => written,
        Err(err) => {
            eprintln!("encode failed: {err}");
            return;
        }
    };
    println!("encoded {written} bytes: {:02x?}", &message[..written]);

    let (received, _) = match Bitmap::create_from_buffer(&message) {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("decode failed: {err}");
            return;
        }
    };
    let missing: Vec<u32> = (0..received.num_of_bits())
        .filter(|&replica| !received.get(replica))
        .collect();
    println!(
        "{} of {} replicas acknowledged, waiting on {missing:?}",
        received.count_ones(),
        received.num_of_bits()
    );
}
